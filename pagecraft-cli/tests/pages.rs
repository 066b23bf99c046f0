use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const RESPONSE: &str = "Here are your pages.\n\
// index.html\n\
```html\n\
<h1>Home</h1>\n\
```\n\
<!-- about.html -->\n\
<p>About us</p>\n";

#[test]
fn writes_one_file_per_page() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("response.txt");
    fs::write(&input, RESPONSE).unwrap();
    let out = dir.path().join("site");

    let mut cmd = cargo_bin_cmd!("pagecraft");
    cmd.arg("pages").arg(&input).arg("-o").arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("index.html"))
        .stdout(predicate::str::contains("about.html"));

    assert_eq!(fs::read_to_string(out.join("index.html")).unwrap(), "<h1>Home</h1>");
    assert_eq!(fs::read_to_string(out.join("about.html")).unwrap(), "<p>About us</p>");
}

#[test]
fn converts_each_page() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("response.txt");
    fs::write(&input, RESPONSE).unwrap();
    let out = dir.path().join("trees");

    let mut cmd = cargo_bin_cmd!("pagecraft");
    cmd.arg("pages")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--to")
        .arg("json");
    cmd.assert().success();

    let about: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("about.json")).unwrap()).unwrap();
    assert_eq!(about["node-1"]["props"]["text"], "About us");
    assert!(out.join("index.json").exists());
}
