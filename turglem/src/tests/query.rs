use crate::engine::{Candidate, FormIndex, LexemeId, MorphologyEngine, PartOfSpeech};
use crate::errors::{Result, TurglemError};
use crate::grammeme::GrammemeMask;
use crate::letter::{Letter, LetterBuf, MAX_WORD_LETTERS};
use crate::query::{OutputModes, QueryOptions, QueryPipeline};
use crate::test_utils::{build_test_dictionary, query};

#[test]
fn test_normal_form_single() {
    let dict = build_test_dictionary();
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, true, &["книги"]), "книга\n");
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, true, &["КНИГИ"]), "книга\n");
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, true, &["столу"]), "стол\n");
}

#[test]
fn test_normal_form_with_prefix() {
    let dict = build_test_dictionary();
    assert_eq!(
        query(&dict, OutputModes::NORMAL_FORM, true, &["наилучший"]),
        "лучший\n"
    );
}

#[test]
fn test_normal_form_ambiguous() {
    let dict = build_test_dictionary();
    assert_eq!(
        query(&dict, OutputModes::NORMAL_FORM, true, &["стали"]),
        "сталь|стать\n"
    );
}

#[test]
fn test_unknown_words() {
    let dict = build_test_dictionary();
    assert_eq!(
        query(&dict, OutputModes::NORMAL_FORM, true, &["привет", "book", "", "книга|0|0"]),
        ""
    );
}

#[test]
fn test_prediction() {
    let dict = build_test_dictionary();
    assert_eq!(
        query(&dict, OutputModes::NORMAL_FORM, true, &["интриги"]),
        "интрига\n"
    );
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, false, &["интриги"]), "");
    // Dictionary words never fall back to prediction.
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, false, &["книги"]), "книга\n");
}

#[test]
fn test_prediction_uses_proper_suffixes() {
    let dict = build_test_dictionary();
    // A word is never its own suffix.
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, true, &["ол"]), "");
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, true, &["пол"]), "пол\n");
    assert_eq!(query(&dict, OutputModes::NORMAL_FORM, true, &["сала"]), "сать\n");
}

#[test]
fn test_paradigm() {
    let dict = build_test_dictionary();
    let out = query(&dict, OutputModes::PARADIGM, true, &["книги"]);
    assert_eq!(
        out,
        "       0     0  ,2,10,12,    1  книга  \n\
         \x20      0     1  ,3,10,12,    1  книги *\n\
         \x20      0     2  ,4,10,12,    1  книге  \n\
         \x20      0     3  ,5,10,12,    1  книгу  \n\
         \x20      0     4  ,2,11,12,    1  книги  \n\
         \x20      0     5  ,3,11,12,    1  книг  \n"
    );
}

#[test]
fn test_paradigm_marks_matched_form_per_lexeme() {
    let dict = build_test_dictionary();
    let out = query(&dict, OutputModes::PARADIGM, true, &["стали"]);
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), dict.form_count(1) + dict.form_count(2));

    let marked: Vec<&str> = rows.iter().copied().filter(|r| r.ends_with('*')).collect();
    assert_eq!(marked.len(), 2);
    assert!(marked[0].starts_with("       1     1  "));
    assert!(marked[1].starts_with("       2     3  "));
}

#[test]
fn test_normal_form_and_paradigm() {
    let dict = build_test_dictionary();
    let out = query(
        &dict,
        OutputModes::NORMAL_FORM | OutputModes::PARADIGM,
        true,
        &["стола"],
    );
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], "стол");
    assert_eq!(rows[1], "       3     0  ,2,10,13,    1  стол  ");
    assert_eq!(rows[2], "       3     1  ,3,10,13,    1  стола *");
    assert_eq!(rows[4], "       3     3  ,2,11,13,    1  столы  ");
}

#[test]
fn test_process_lines() {
    let dict = build_test_dictionary();
    let options = QueryOptions::new(OutputModes::NORMAL_FORM, true).unwrap();
    let pipeline = QueryPipeline::new(&dict, options);

    let mut out = vec![];
    pipeline
        .process_lines("книги\r\n\nпривет\nстали".as_bytes(), &mut out)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "книга\nсталь|стать\n");
}

#[test]
fn test_process_lines_empty_input() {
    let dict = build_test_dictionary();
    let options = QueryOptions::new(OutputModes::PARADIGM, true).unwrap();
    let pipeline = QueryPipeline::new(&dict, options).flush_each_word(true);

    let mut out = vec![];
    pipeline.process_lines(&b""[..], &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_process_lines_invalid_utf8() {
    let dict = build_test_dictionary();
    let options = QueryOptions::new(OutputModes::NORMAL_FORM, true).unwrap();
    let pipeline = QueryPipeline::new(&dict, options);

    let mut input = b"\xd0\xba\xd0\n".to_vec();
    input.extend_from_slice("стол\n".as_bytes());
    let mut out = vec![];
    pipeline.process_lines(&input[..], &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "стол\n");
}

#[test]
fn test_too_long_word_is_skipped() {
    let dict = build_test_dictionary();
    let long = format!("{}ги", "и".repeat(MAX_WORD_LETTERS));
    assert_eq!(
        query(&dict, OutputModes::NORMAL_FORM, true, &[&long, "книги"]),
        "книга\n"
    );
}

/// 語彙素 1 と語形 1 の生成に失敗し、語形 2 のグラメムを持たないエンジン
struct FlakyEngine;

impl MorphologyEngine for FlakyEngine {
    fn lemmatize(&self, _word: &[Letter], _use_prediction: bool) -> Vec<Candidate> {
        vec![
            Candidate::new(1, 0),
            Candidate::new(0, 1),
            Candidate::new(1, 0),
            Candidate::new(0, 0),
        ]
    }

    fn build_form(
        &self,
        word: &[Letter],
        lexeme: LexemeId,
        _matched: FormIndex,
        target: FormIndex,
        out: &mut LetterBuf,
    ) -> Result<()> {
        if lexeme == 1 || target == 1 {
            return Err(TurglemError::invalid_argument("lexeme", "broken"));
        }
        out.clear();
        out.extend_from_slice(word)?;
        Ok(())
    }

    fn form_count(&self, lexeme: LexemeId) -> usize {
        if lexeme == 0 {
            3
        } else {
            1
        }
    }

    fn grammemes(&self, _lexeme: LexemeId, form: FormIndex) -> Option<GrammemeMask> {
        (form != 2).then_some(GrammemeMask::EMPTY)
    }

    fn part_of_speech(&self, _lexeme: LexemeId, _form: FormIndex) -> Option<PartOfSpeech> {
        Some(0)
    }

    fn enumerate(&self, _prefix: &[Letter], _visit: &mut dyn FnMut(&[Letter])) {}
}

#[test]
fn test_failed_candidates_are_isolated() {
    let options = QueryOptions::new(OutputModes::NORMAL_FORM, true).unwrap();
    let pipeline = QueryPipeline::new(FlakyEngine, options);

    let mut out = vec![];
    pipeline.process_word("дом".as_bytes(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "дом|дом\n");
}

#[test]
fn test_failed_forms_are_isolated() {
    let options = QueryOptions::new(OutputModes::PARADIGM, true).unwrap();
    let pipeline = QueryPipeline::new(FlakyEngine, options);

    let mut out = vec![];
    pipeline.process_word("дом".as_bytes(), &mut out).unwrap();
    // Form 1 fails to build and form 2 has no grammemes.
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "       0     0  ,    0  дом  \n\
         \x20      0     0  ,    0  дом *\n"
    );
}
