use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bookstore(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.env("BOOKSTORE_DB_PATH", dir.join("data").join("bookstore.db"))
        .env("BOOKSTORE_INIT_SQL", dir.join("init.sql"))
        .env("BOOKSTORE_BACKUP_DIR", dir.join("backups"))
        .env("BOOKSTORE_EXPORTS_DIR", dir.join("exports"))
        .env_remove("RUST_LOG");
    cmd
}

fn add_book(dir: &Path, title: &str, author: &str, year: &str, price: &str) {
    bookstore(dir)
        .args(["add", "--title", title, "--author", author, "--year", year, "--price", price])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book added with id"));
}

fn snapshots(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir.join("backups")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn list_on_fresh_database() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books registered."));

    assert!(temp.path().join("data").join("bookstore.db").exists());
    assert!(snapshots(temp.path()).is_empty());
}

#[test]
fn add_list_and_search() {
    let temp = TempDir::new().unwrap();
    add_book(temp.path(), "Dune", "Frank Herbert", "1965", "39.9");
    add_book(temp.path(), "Emma", "Jane Austen", "", "12.5");

    bookstore(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").and(predicate::str::contains("Emma")));

    bookstore(temp.path())
        .args(["search", "--author", "herb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").and(predicate::str::contains("Emma").not()));

    bookstore(temp.path())
        .args(["search", "--author", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found for that author."));
}

#[test]
fn mutations_snapshot_and_retain_five() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("backups")).unwrap();
    for i in 0..7 {
        fs::write(temp.path().join("backups").join(format!("old{}.db", i)), b"x").unwrap();
    }

    add_book(temp.path(), "Dune", "Herbert", "1965", "39.9");

    assert_eq!(snapshots(temp.path()).len(), 5);
}

#[test]
fn update_and_delete_missing_book() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path())
        .args(["update-price", "--id", "99", "--price", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book not found: 99"));

    bookstore(temp.path())
        .args(["delete", "--id", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book not found: 99"));
}

#[test]
fn update_price_and_delete() {
    let temp = TempDir::new().unwrap();
    add_book(temp.path(), "Dune", "Herbert", "1965", "39.9");

    bookstore(temp.path())
        .args(["update-price", "--id", "1", "--price", "45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Price updated.").and(predicate::str::contains("45.00")));

    bookstore(temp.path())
        .args(["delete", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book removed."));
}

#[test]
fn export_then_import() {
    let temp = TempDir::new().unwrap();
    add_book(temp.path(), "Dune", "Herbert", "1965", "39.9");

    bookstore(temp.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("books_export.csv"));

    let exported = temp.path().join("exports").join("books_export.csv");
    let contents = fs::read_to_string(&exported).unwrap();
    assert!(contents.starts_with("id,title,author,publication_year,price"));
    assert!(contents.contains("1,Dune,Herbert,1965,39.9"));

    bookstore(temp.path())
        .arg("import")
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rows imported."));

    bookstore(temp.path())
        .args(["search", "--author", "Herbert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").count(2));
}

#[test]
fn import_missing_file_fails() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path())
        .arg("import")
        .arg(temp.path().join("missing.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.csv"));
}

#[test]
fn clear_declined_and_forced() {
    let temp = TempDir::new().unwrap();
    add_book(temp.path(), "Dune", "Herbert", "1965", "39.9");
    let before = snapshots(temp.path()).len();

    bookstore(temp.path())
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));
    assert_eq!(snapshots(temp.path()).len(), before);

    bookstore(temp.path())
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All books were removed"));

    bookstore(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books registered."));
}

#[test]
fn report_requires_books() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("There are no books to report on."));

    add_book(temp.path(), "Dune", "Herbert", "1965", "39.9");

    bookstore(temp.path())
        .args(["report", "--output", "inventory.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report generated at"));

    let pdf = fs::read(temp.path().join("exports").join("inventory.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn seed_script_applies_once() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("init.sql"),
        "INSERT INTO books (title, author, publication_year, price) VALUES ('Seeded', 'Someone', 2000, 10.0);",
    )
    .unwrap();

    bookstore(temp.path()).arg("list").assert().success();
    bookstore(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded").count(1));
}

#[test]
fn backup_commands() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path())
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created:"));

    bookstore(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn menu_runs_scripted_session() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path())
        .arg("menu")
        .write_stdin("1\nDune\nHerbert\n1965\n39.9\n2\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Book added with id 1").and(predicate::str::contains("Dune")));
}

#[test]
fn config_shows_paths() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backups kept:   5"));

    assert!(!temp.path().join("data").exists());
}

#[test]
fn init_writes_settings() {
    let temp = TempDir::new().unwrap();

    bookstore(temp.path()).arg("init").assert().success();

    assert!(temp.path().join("data").join("bookstore.json").exists());
}
