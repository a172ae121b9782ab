use crate::note::render::*;
use crate::note::source::SourceFile;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};

fn fixed_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 14, 15, 4, 5)
        .unwrap()
}

fn no_clock() -> DateTime<Utc> {
    panic!("clock must not be consulted without a timestamp")
}

#[test]
fn test_render_python_without_timestamp() {
    let output = render(
        "foo.py",
        "/work/foo.py",
        "print(\"hi\")\n",
        "python",
        false,
        no_clock,
    );

    assert_eq!(
        output,
        "# foo.py\n\n**File:** `/work/foo.py`\n\n```python\nprint(\"hi\")\n\n```"
    );
    assert!(!output.contains("> Last synced"));
}

#[test]
fn test_render_fence_body_is_verbatim() {
    let text = "print(\"hi\")\n";
    let output = render("foo.py", "/work/foo.py", text, "python", false, no_clock);

    let body = output
        .strip_prefix("# foo.py\n\n**File:** `/work/foo.py`\n\n```python\n")
        .and_then(|rest| rest.strip_suffix("\n```"))
        .unwrap();
    assert_eq!(body, text);
}

#[test]
fn test_render_with_timestamp() {
    let output = render("a.rs", "/a.rs", "fn main() {}", "rust", true, fixed_time);

    assert_eq!(
        output,
        "# a.rs\n\n> Last synced: 10/14/2026, 3:04:05 PM\n\n**File:** `/a.rs`\n\n```rust\nfn main() {}\n```"
    );
}

#[test]
fn test_render_is_deterministic_for_fixed_clock() {
    let first = render("a.rs", "/a.rs", "x", "rust", true, fixed_time);
    let second = render("a.rs", "/a.rs", "x", "rust", true, fixed_time);
    assert_eq!(first, second);
}

#[test]
fn test_render_does_not_escape_backticks() {
    let text = "```\nnested\n```";
    let output = render("README.md", "/README.md", text, "markdown", false, no_clock);
    assert!(output.contains("```markdown\n```\nnested\n```\n```"));
}

#[test]
fn test_render_empty_content() {
    let output = render("empty.txt", "/empty.txt", "", "txt", false, no_clock);
    assert!(output.ends_with("```txt\n\n```"));
}

#[test]
fn test_render_source_unknown_extension_uses_extension_tag() {
    let file = SourceFile::new("/work/data.xyz", "payload", None);
    let output = render_source(&file, false, no_clock);

    assert!(output.starts_with("# data.xyz\n\n"));
    assert!(output.contains("**File:** `/work/data.xyz`"));
    assert!(output.contains("```xyz\npayload\n```"));
}

#[test]
fn test_render_source_uses_file_name_hint() {
    let file = SourceFile::new("/work/Dockerfile", "FROM alpine", None);
    let output = render_source(&file, false, no_clock);
    assert!(output.contains("```dockerfile\nFROM alpine\n```"));
}

#[test]
fn test_render_source_without_extension_or_hint() {
    let file = SourceFile::new("/work/LICENSE", "MIT", None);
    let output = render_source(&file, false, no_clock);
    assert!(output.contains("```text\nMIT\n```"));
}
