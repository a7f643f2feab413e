// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kakeibo::commands::{LocalRepository, importer};
use kakeibo::db::{self, SqliteStore};
use kakeibo::models::TxType;
use kakeibo::repository::Repository;
use kakeibo::sync::ImportReport;
use kakeibo::{cli, commands};
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> LocalRepository {
    Repository::open(SqliteStore::new(db::open_in_memory().unwrap())).unwrap()
}

fn import_file(repo: &mut LocalRepository, contents: &str) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    let path = format!("  {}  ", file.path().to_str().unwrap());
    let matches = cli::build_cli().get_matches_from(["kakeibo", "import", "csv", "--path", &path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(repo, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn csv_rows_are_classified_and_deduplicated() {
    let mut repo = setup();
    let csv = "date,amount,note\n2025-02-03,1000,Starbucks\n2025-02-03,1000,Starbucks\n2025-02-04,3200,ENEOS\n";
    import_file(&mut repo, csv);
    assert_eq!(repo.list().len(), 2);
    import_file(&mut repo, csv);
    assert_eq!(repo.list().len(), 2);

    let eneos = repo.query(|t| t.note.as_deref() == Some("ENEOS"));
    assert_eq!(eneos[0].category_name, "Transport");
}

#[test]
fn csv_optional_columns() {
    let rows = importer::read_records(
        "Type,ID,Date,Amount,Note\nincome,p-1,2025-03-25,280000,給与\n,,2025-03-26,500,\n".as_bytes(),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].r#type, TxType::Income);
    assert_eq!(rows[0].id.as_deref(), Some("p-1"));
    assert_eq!(rows[1].id, None);
    assert_eq!(rows[1].note, None);
}

#[test]
fn csv_rejects_bad_rows() {
    let err = importer::read_records("date,amount,note\n2025-03-01,-4,refund\n".as_bytes())
        .unwrap_err();
    assert!(err.to_string().contains("Row 2"));
    assert!(importer::read_records("when,amount\n2025-03-01,4\n".as_bytes()).is_err());
}

#[test]
fn sync_report_wording() {
    let none = ImportReport::default();
    assert_eq!(commands::sync::describe(&none), "No new transactions");
    let some = ImportReport {
        added: 3,
        duplicates: 1,
        malformed: 0,
    };
    assert_eq!(
        commands::sync::describe(&some),
        "Imported 3 transaction(s), 1 duplicate(s) skipped"
    );
}
