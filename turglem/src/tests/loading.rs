use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::dictionary::Dictionary;
use crate::errors::{LoadTarget, TurglemError};
use crate::query::OutputModes;
use crate::test_utils::{query, DICT_CSV, PARADIGMS_CSV, PREDICTION_CSV};

struct Sources {
    _dir: TempDir,
    dict: PathBuf,
    prediction: PathBuf,
    paradigms: PathBuf,
}

#[track_caller]
fn write_sources(dict: &str, prediction: &str, paradigms: &str) -> Sources {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, text: &str| {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    };
    Sources {
        dict: write("dict.csv", dict),
        prediction: write("prediction.csv", prediction),
        paradigms: write("paradigms.csv", paradigms),
        _dir: dir,
    }
}

#[track_caller]
fn load_error(dict: &Path, prediction: &Path, paradigms: &Path) -> TurglemError {
    match Dictionary::load(dict, prediction, paradigms) {
        Ok(_) => panic!("loading should fail"),
        Err(e) => e,
    }
}

#[test]
fn test_load() {
    let src = write_sources(DICT_CSV, PREDICTION_CSV, PARADIGMS_CSV);
    let dict = Dictionary::load(&src.dict, &src.prediction, &src.paradigms).unwrap();
    assert_eq!(dict.lexicon().num_entries(), 18);
    assert_eq!(dict.paradigms().len(), 5);
    assert_eq!(
        query(&dict, OutputModes::NORMAL_FORM, true, &["книгу", "интригу"]),
        "книга\nинтрига\n"
    );
}

#[test]
fn test_load_zstd() {
    let src = write_sources(DICT_CSV, PREDICTION_CSV, PARADIGMS_CSV);
    let compressed = zstd::encode_all(DICT_CSV.as_bytes(), 3).unwrap();
    let zst_path = src.dict.with_extension("csv.zst");
    fs::write(&zst_path, compressed).unwrap();

    let dict = Dictionary::load(&zst_path, &src.prediction, &src.paradigms).unwrap();
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, true, &["столы"]), "стол\n");
}

#[test]
fn test_missing_prediction() {
    let src = write_sources(DICT_CSV, PREDICTION_CSV, PARADIGMS_CSV);
    let missing = src.prediction.with_file_name("missing.csv");
    let e = load_error(&src.dict, &missing, &src.paradigms);
    assert_eq!(e.code(), 2);
    assert!(matches!(
        e,
        TurglemError::Load {
            target: LoadTarget::Prediction,
            ..
        }
    ));
}

#[test]
fn test_malformed_dictionary() {
    let src = write_sources("книга,0\n", PREDICTION_CSV, PARADIGMS_CSV);
    let e = load_error(&src.dict, &src.prediction, &src.paradigms);
    assert_eq!(e.code(), 1);
}

#[test]
fn test_dictionary_with_unknown_form() {
    let src = write_sources("книга,0,9\n", PREDICTION_CSV, PARADIGMS_CSV);
    let e = load_error(&src.dict, &src.prediction, &src.paradigms);
    assert_eq!(e.code(), 1);
}

#[test]
fn test_malformed_paradigms() {
    let src = write_sources(DICT_CSV, PREDICTION_CSV, "0,0,,а,1\n");
    let e = load_error(&src.dict, &src.prediction, &src.paradigms);
    assert_eq!(e.code(), 3);
    assert!(e.to_string().contains("paradigm table"));
}

#[test]
fn test_corrupt_zstd() {
    let src = write_sources(DICT_CSV, PREDICTION_CSV, PARADIGMS_CSV);
    let zst_path = src.paradigms.with_extension("csv.zst");
    fs::write(&zst_path, PARADIGMS_CSV).unwrap();
    let e = load_error(&src.dict, &src.prediction, &zst_path);
    assert_eq!(e.code(), 3);
}
