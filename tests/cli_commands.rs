mod common;

use common::TestContext;
use predicates::prelude::*;
use std::fs;

#[test]
fn publish_welcome_job_writes_page_and_index() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();

    ctx.cli()
        .args(["publish", "--env", "beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published ➜  file://"))
        .stdout(predicate::str::contains("beta/welcome_jordan.html"))
        .stdout(predicate::str::contains("2 artifact(s) published"));

    assert_eq!(
        ctx.read_site("beta/welcome_jordan.html"),
        "Hello Jordan,\nWelcome to **Aurora Digital**!"
    );
    let index = ctx.read_site("beta/index.html");
    assert!(index.contains("href=\"welcome_jordan.html\""));
    assert!(index.contains("(beta)"));
}

#[test]
fn primary_branch_publishes_to_prod_prefix() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();

    ctx.cli().args(["publish", "--branch", "main"]).assert().success();

    assert!(ctx.site_dir().join("prod/welcome_jordan.html").exists());
    assert!(!ctx.site_dir().join("beta").exists());
}

#[test]
fn github_ref_name_selects_beta_for_feature_branches() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();

    ctx.cli().env("GITHUB_REF_NAME", "feature/landing").arg("p").assert().success();

    assert!(ctx.site_dir().join("beta/welcome_jordan.html").exists());
}

#[test]
fn invalid_job_fails_run_but_valid_job_publishes() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();
    ctx.write_job("broken_prompt.json", r#"{"output_file_template": "broken.html"}"#);

    ctx.cli()
        .args(["publish", "--env", "beta"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed ✗  broken_prompt.json [ValidationError]"))
        .stderr(predicate::str::contains("variables"))
        .stderr(predicate::str::contains("Failed jobs: broken_prompt.json"));

    assert!(ctx.site_dir().join("beta/welcome_jordan.html").exists());
    assert!(!ctx.site_dir().join("beta/broken.html").exists());
}

#[test]
fn unresolved_placeholder_is_a_render_error() {
    let ctx = TestContext::new();
    ctx.write_job(
        "promo_prompt.yml",
        "output_file_template: promo.html\nvariables:\n  name: Jordan\n",
    );
    ctx.write_template("promo.txt", "Hi {{name}}, your code is {{code}}");

    ctx.cli()
        .args(["publish", "--env", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("promo_prompt.yml [RenderError]"));

    assert!(!ctx.site_dir().join("prod/promo.html").exists());
}

#[test]
fn missing_bucket_is_fatal_before_any_work() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();

    ctx.cli()
        .env_remove("S3_BUCKET_PROD")
        .args(["publish", "--env", "prod"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: No bucket defined for environment 'prod'. Set S3_BUCKET_PROD and try again.",
        ));

    assert!(!ctx.site_dir().exists());
}

#[test]
fn unknown_override_is_fatal() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();

    ctx.cli()
        .args(["publish", "--env", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn publish_report_is_written_as_json() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();

    ctx.cli().args(["publish", "--env", "beta", "--report", "out/report.json"]).assert().success();

    let raw = fs::read_to_string(ctx.work_dir().join("out/report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(report["environment"], "beta");
    assert_eq!(report["published"][0]["key"], "beta/welcome_jordan.html");
    assert_eq!(report["published"][0]["sha256"].as_str().unwrap().len(), 64);
    assert_eq!(report["published"][1]["path"], "index.html");
    assert_eq!(report["failures"].as_array().unwrap().len(), 0);
}

#[test]
fn config_file_supplies_paths_and_destinations() {
    let ctx = TestContext::new();
    let jobs = ctx.work_dir().join("jobs");
    fs::create_dir_all(&jobs).unwrap();
    fs::write(
        jobs.join("about_prompt.json"),
        r#"{"output_file_template": "about.md", "variables": {"team": "Docs"}}"#,
    )
    .unwrap();
    ctx.write_template("about.txt", "# {{ team }}");
    fs::write(
        ctx.work_dir().join("promptsite.toml"),
        format!(
            "[paths]\njobs_dir = \"jobs\"\n\n\
             [environments]\nprimary_branch = \"release\"\n\
             prod_prefix = \"live/\"\nprod_bucket = \"{}\"\n",
            ctx.site_destination()
        ),
    )
    .unwrap();

    ctx.cli()
        .env_remove("S3_BUCKET_PROD")
        .args(["publish", "--branch", "release"])
        .assert()
        .success();

    assert_eq!(ctx.read_site("live/about.md"), "# Docs");
}

#[test]
fn unknown_config_keys_are_rejected() {
    let ctx = TestContext::new();
    fs::write(ctx.work_dir().join("custom.toml"), "[paths]\njob_dir = \"typo\"\n").unwrap();

    ctx.cli()
        .args(["--config", "custom.toml", "env", "--env", "beta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn render_writes_local_copies_only() {
    let ctx = TestContext::new();
    ctx.write_welcome_job();

    ctx.cli()
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered ➜  file://"));

    let page = fs::read_to_string(ctx.work_dir().join("outputs/welcome_jordan.html")).unwrap();
    assert_eq!(page, "Hello Jordan,\nWelcome to **Aurora Digital**!");
    assert!(!ctx.work_dir().join("outputs/index.html").exists());
    assert!(!ctx.site_dir().exists());
}

#[test]
fn env_prints_selected_environment() {
    let ctx = TestContext::new();

    ctx.cli().args(["env", "--branch", "main"]).assert().success().stdout("prod\n");
    ctx.cli().args(["env", "--branch", "refs/heads/feature/x"]).assert().success().stdout("beta\n");
    ctx.cli()
        .env("DEPLOY_ENV", "prod")
        .args(["env", "--branch", "feature/x"])
        .assert()
        .success()
        .stdout("prod\n");
    ctx.cli()
        .env("PRIMARY_BRANCH", "trunk")
        .args(["env", "--branch", "main"])
        .assert()
        .success()
        .stdout("beta\n");
}

#[test]
fn env_without_any_branch_context_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("env")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot determine target environment"));
}

#[test]
fn missing_jobs_directory_is_fatal() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["publish", "--env", "beta", "--jobs-dir", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Jobs directory not found"));
}
