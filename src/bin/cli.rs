use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    codenote::cli::run().await
}
