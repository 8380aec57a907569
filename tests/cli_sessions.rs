use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bookstore(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.arg("--data-dir")
        .arg(data_dir)
        .env_remove("BOOKSTORE_HOME")
        .env_remove("RUST_LOG");
    cmd
}

fn session(data_dir: &Path, input: &str) -> String {
    let output = bookstore(data_dir).write_stdin(input).output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn customer_buys_restocked_book() {
    let temp = TempDir::new().unwrap();
    let output = session(
        temp.path(),
        r#"su root sjtu
useradd clerk pw 3 Clerk
su clerk pw
select 978-7-111
modify -name="The Rust Book" -author="Klabnik" -keyword="rust|programming" -price=12
import 10 100
logout
register alice apw Alice
su alice apw
buy 978-7-111 2
show -ISBN=978-7-111
logout
show finance
report finance
"#,
    );
    assert_eq!(
        output,
        "24.00\n\
         978-7-111\tThe Rust Book\tKlabnik\trust|programming\t12.00\t8\n\
         + 24.00 - 100.00\n\
         === Financial Report ===\n\
         Total Income: 24.00\n\
         Total Expenditure: 100.00\n\
         Net Profit: -76.00\n"
    );
}

#[test]
fn rejected_commands_print_invalid() {
    let temp = TempDir::new().unwrap();
    bookstore(temp.path())
        .write_stdin("show\nsu root wrong\nfly away\nsu root sjtu\nuseradd boss pw 7 Boss\n")
        .assert()
        .success()
        .stdout("Invalid\nInvalid\nInvalid\nInvalid\n");
}

#[test]
fn show_finance_zero_and_too_many() {
    let temp = TempDir::new().unwrap();
    bookstore(temp.path())
        .write_stdin("su root sjtu\nshow finance 0\nshow finance 1\nshow finance\n")
        .assert()
        .success()
        .stdout("\nInvalid\n+ 0.00 - 0.00\n");
}

#[test]
fn empty_show_prints_blank_line() {
    let temp = TempDir::new().unwrap();
    bookstore(temp.path())
        .write_stdin("su root sjtu\n\n   \nshow\n")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn quit_stops_reading() {
    let temp = TempDir::new().unwrap();
    bookstore(temp.path())
        .write_stdin("su root sjtu\nlog\nquit\nlog\n")
        .assert()
        .success()
        .stdout("=== System Log ===\nTotal transactions: 0\n");
}

#[test]
fn state_survives_restarts() {
    let temp = TempDir::new().unwrap();
    session(
        temp.path(),
        "su root sjtu\nregister bob bpw Bob\nselect 42\nmodify -price=3.5\nimport 4 6\nexit\n",
    );

    for name in ["accounts.dat", "books.dat", "transactions.dat"] {
        assert!(temp.path().join(name).exists(), "{} missing", name);
    }
    assert_eq!(fs::metadata(temp.path().join("accounts.dat")).unwrap().len(), 2 * 91);
    assert_eq!(fs::metadata(temp.path().join("books.dat")).unwrap().len(), 224);
    assert_eq!(fs::metadata(temp.path().join("transactions.dat")).unwrap().len(), 17);

    let output = session(
        temp.path(),
        "su bob bpw\nbuy 42 1\nlogout\nsu root sjtu\nshow\nreport employee\nlog\n",
    );
    assert_eq!(
        output,
        "3.50\n\
         42\t\t\t\t3.50\t3\n\
         === Employee Work Report ===\n\
         Total employees: 2\n\
         === System Log ===\n\
         Total transactions: 2\n"
    );
}

#[test]
fn login_stack_does_not_survive_restarts() {
    let temp = TempDir::new().unwrap();
    session(temp.path(), "su root sjtu\n");
    bookstore(temp.path())
        .write_stdin("log\n")
        .assert()
        .success()
        .stdout("Invalid\n");
}

#[test]
fn config_file_renames_data_files() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.json"),
        r#"{ "accounts_file": "users.bin" }"#,
    )
    .unwrap();
    session(temp.path(), "register bob pw Bob\n");
    assert!(temp.path().join("users.bin").exists());
    assert!(!temp.path().join("accounts.dat").exists());
}

#[test]
fn home_env_selects_data_dir() {
    let temp = TempDir::new().unwrap();
    Command::cargo_bin("bookstore")
        .unwrap()
        .env("BOOKSTORE_HOME", temp.path())
        .write_stdin("register bob pw Bob\n")
        .assert()
        .success();
    assert!(temp.path().join("accounts.dat").exists());
}

#[test]
fn corrupt_file_is_fatal() {
    let temp = TempDir::new().unwrap();
    let mut record = [0u8; 17];
    record[16] = 0xFF;
    fs::write(temp.path().join("transactions.dat"), record).unwrap();
    bookstore(temp.path())
        .write_stdin("su root sjtu\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn verbose_logs_rejections_to_stderr() {
    let temp = TempDir::new().unwrap();
    bookstore(temp.path())
        .arg("--verbose")
        .write_stdin("su nobody\n")
        .assert()
        .success()
        .stdout("Invalid\n")
        .stderr(predicate::str::contains("rejected"));
}

#[test]
fn non_utf8_input_is_rejected_not_fatal() {
    let temp = TempDir::new().unwrap();
    bookstore(temp.path())
        .write_stdin(b"su root sjtu\nregister caf\xe9 pw X\nshow -name=\"\xff\"\nlog\n".to_vec())
        .assert()
        .success()
        .stdout("Invalid\nInvalid\n=== System Log ===\nTotal transactions: 0\n");
}
