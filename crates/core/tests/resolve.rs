use filecat_core::error::InvalidPathError;
use filecat_core::resolver::{resolve, DriveMappings};

#[test]
fn existing_local_path_is_returned_unchanged() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().to_string_lossy().into_owned();
    assert_eq!(resolve(&path, &DriveMappings::default()).unwrap(), path);
}

#[test]
fn missing_local_path_is_invalid() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("nope").to_string_lossy().into_owned();
    let err = resolve(&missing, &DriveMappings::default()).unwrap_err();
    assert_eq!(err, InvalidPathError::Local(missing.clone()));
    assert_eq!(
        err.to_string(),
        format!("Invalid or inaccessible local path: {missing}")
    );
}

#[test]
fn missing_unc_path_is_invalid() {
    let err = resolve(r"\\no-such-server\share", &DriveMappings::default()).unwrap_err();
    assert!(matches!(err, InvalidPathError::Unc(_)), "{err:?}");
}

#[test]
fn mapped_drive_is_replaced_by_its_share() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join("projects")).unwrap();
    let share = temp.path().to_string_lossy().into_owned();
    let drives = DriveMappings::default().with('Z', share.clone());

    let resolved = resolve("z:/projects", &drives).unwrap();
    assert_eq!(
        resolved,
        temp.path().join("projects").to_string_lossy().into_owned()
    );

    let err = resolve("Z:/missing", &drives).unwrap_err();
    assert!(matches!(err, InvalidPathError::MappedDrive(_)), "{err:?}");
}

#[test]
fn unmapped_drive_letter_falls_through_to_local_check() {
    let drives = DriveMappings::default();
    let err = resolve("Q:/does-not-exist", &drives).unwrap_err();
    assert!(matches!(err, InvalidPathError::Local(_)), "{err:?}");
}
