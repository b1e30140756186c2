//! The Ctrl-C flag stops the driver before the next folder. Lives in its own
//! test binary because the flag is process-wide.

use assert_fs::prelude::*;
use level_zap::prelude::*;
use level_zap::shutdown;

#[test]
fn pending_shutdown_leaves_remaining_folders_alone() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("one/a.txt").write_str("a").unwrap();
    td.child("two/b.txt").write_str("b").unwrap();
    let cfg = Config::default();
    let files = NativeFileOps::silent();
    let zapper = Zapper::new(&cfg, &AssumeYes, &files, &UuidTokens).silent(true);

    request_shutdown();
    let sel = FolderSelection::new([td.path().join("one"), td.path().join("two")]);
    let report = zapper.zap_all_folders(&sel, false);
    shutdown::reset();

    assert_eq!(report.len(), 2);
    assert!(
        report
            .entries()
            .iter()
            .all(|(_, r)| matches!(r, FolderResult::Failed(Error::Interrupted)))
    );
    assert_eq!(report.result_code(), ResultCode::Aborted);
    td.child("one/a.txt").assert("a");
    td.child("two/b.txt").assert("b");
}
