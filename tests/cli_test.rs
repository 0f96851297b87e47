use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/test.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "order,status,gateway,amount,payment",
        ))
        // Order 1 settles through the real gateway callback
        .stdout(predicate::str::contains("1,paid,alipay,1.5,success"))
        // Order 2 captures inline on the mock gateway
        .stdout(predicate::str::contains("2,paid,mock,2,success"));

    Ok(())
}
