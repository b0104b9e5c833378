use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn sini(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sini").unwrap();
    cmd.env("SINI_DATA_DIR", data_dir.path()).env_remove("SINI_LOG");
    cmd
}

#[test]
fn test_single_relocation_submits() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["relocation", "run", "--answers", &fixture("relocation_single.json")])
        .args(["--query", "userType=sinistre&brand=generali"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"relocationType\": \"single\""))
        .stdout(predicate::str::contains("\"singleSpecialNeeds\""))
        .stdout(predicate::str::contains("\"reference\": \"SINI-"))
        .stdout(predicate::str::contains("\"brand\": \"generali\""))
        .stdout(predicate::str::contains("multiple").not());
}

#[test]
fn test_multiple_relocation_as_yaml() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["relocation", "run", "--answers", &fixture("relocation_multiple.yaml")])
        .args(["--user-type", "assurance", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# SINI submission SINI-"))
        .stdout(predicate::str::contains("relocationType: multiple"))
        .stdout(predicate::str::contains("householdName: Keller"))
        .stdout(predicate::str::contains("singleDisasterAddress").not());
}

#[test]
fn test_property_submits_listing_details() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["property", "run", "--answers", &fixture("property.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"listingDetails\""))
        .stdout(predicate::str::contains("\"flow\": \"property\""));
}

#[test]
fn test_host_cannot_run_relocation_wizard() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["relocation", "run", "--answers", &fixture("relocation_single.json")])
        .args(["--user-type", "host"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fill in the relocation wizard"));
}

#[test]
fn test_validate_reports_field_errors() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["relocation", "validate", "singleDisasterAddress"])
        .args(["--data", &fixture("bad_address.json")])
        .assert()
        .failure()
        .stdout(predicate::str::contains("has 2 error(s)"))
        .stdout(predicate::str::contains("Enter a valid Swiss postal code"))
        .stdout(predicate::str::contains("floor"));
}

#[test]
fn test_validate_unknown_step() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["property", "validate", "singleDisasterAddress"])
        .args(["--data", &fixture("bad_address.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step not found: singleDisasterAddress"));
}

#[test]
fn test_steps_follow_user_type_hint() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["relocation", "steps", "--user-type", "assurance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("multipleCoordinator"))
        .stdout(predicate::str::contains("singlePersonalData").not());
}

#[test]
fn test_partial_answers_without_draft_fail() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["relocation", "run", "--answers", &fixture("relocation_partial.json")])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Stopped at step 'singlePersonalData': no answer given.",
        ));
}

#[test]
fn test_draft_save_and_resume() {
    let dir = TempDir::new().unwrap();
    let output = sini(&dir)
        .args(["relocation", "run", "--answers", &fixture("relocation_partial.json")])
        .arg("--save-draft")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let draft_id = stdout
        .lines()
        .find_map(|line| line.strip_prefix("Draft saved: "))
        .unwrap()
        .trim()
        .to_string();

    sini(&dir)
        .args(["draft", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(draft_id.as_str()));

    sini(&dir)
        .args(["draft", "show", &draft_id])
        .assert()
        .success()
        .stdout(predicate::str::contains(" >  3  singlePersonalData"));

    sini(&dir)
        .args(["draft", "resume", &draft_id, "--answers", &fixture("relocation_rest.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lastName\": \"Bonvin\""))
        .stdout(predicate::str::contains("\"city\": \"Sierre\""));

    sini(&dir)
        .args(["draft", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No drafts found."));
}

#[test]
fn test_insurer_dashboard() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["cases", "list", "--insurer", "vaudoise", "--open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SINI-2024-0012"))
        .stdout(predicate::str::contains("SINI-2024-0027").not())
        .stdout(predicate::str::contains("1 case(s), 1 household(s)"));
}

#[test]
fn test_cases_export_csv() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["cases", "export", "--canton", "VS"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Reference,Status,Type,Name,City,Canton,Households,Insurer,Host,Opened\n",
        ))
        .stdout(predicate::str::contains("SINI-2025-0003"))
        .stdout(predicate::str::contains("Montreux").not());
}

#[test]
fn test_cases_export_rejects_yaml() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .args(["cases", "export", "--format", "yaml"])
        .assert()
        .failure();
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();
    sini(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_str().unwrap()))
        .stdout(predicate::str::contains("Cases fixture:  (bundled)"));
}
