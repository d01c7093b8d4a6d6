//! `bosun version`: report the build version.

/// Print the version line, or a JSON object under `--json`.
pub fn run(json: bool) {
    let version = env!("CARGO_PKG_VERSION");
    if json {
        println!("{}", serde_json::json!({ "name": "bosun", "version": version }));
    } else {
        println!("bosun {version}");
    }
}
