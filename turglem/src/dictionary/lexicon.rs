//! 単語辞書
//!
//! 表層形から、その語が一致する (語彙素, 語形) の組の列への写像です。
//! キーの順序がそのまま列挙順になります。

use std::collections::BTreeMap;

use crate::dictionary::paradigm::Paradigms;
use crate::engine::{Candidate, FormIndex, LexemeId};
use crate::errors::{Result, TurglemError};
use crate::letter::{self, Letter, MAX_WORD_LETTERS};
use crate::utils::{csv_records, parse_field};

/// 表層形ごとの候補を保持する辞書
#[derive(Default)]
pub struct Lexicon {
    map: BTreeMap<Vec<Letter>, Vec<Candidate>>,
    num_entries: usize,
}

impl Lexicon {
    /// 表層形が完全一致する候補を返します。
    #[inline(always)]
    pub fn get(&self, word: &[Letter]) -> &[Candidate] {
        self.map.get(word).map(Vec::as_slice).unwrap_or_default()
    }

    /// (表層形, 候補) の組の総数
    #[inline(always)]
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    /// `prefix` で始まる表層形を順に返します。
    pub fn iter_prefix<'a>(
        &'a self,
        prefix: &'a [Letter],
    ) -> impl Iterator<Item = (&'a [Letter], &'a [Candidate])> + 'a {
        self.map
            .range::<[Letter], _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(move |(word, _)| word.starts_with(prefix))
            .map(|(word, candidates)| (word.as_slice(), candidates.as_slice()))
    }

    /// 単語と語形の対応表 (`word,paradigm,form`) を読み込みます。
    ///
    /// 同じ語に複数行があれば、その順序で候補になります。
    /// `name` はエラーメッセージ中のソース名です。
    ///
    /// # エラー
    ///
    /// 行の形式が不正な場合、存在しない語形を参照する場合、
    /// または語がその語形の接頭辞・語尾に適合しない場合にエラーを返します。
    pub fn parse_csv(text: &str, name: &'static str, paradigms: &Paradigms) -> Result<Self> {
        let mut lexicon = Self::default();
        for record in csv_records(text) {
            let (line, fields) = record?;
            let (word, candidate) = parse_entry(name, line, &fields, paradigms)?;
            let fits = paradigms
                .form(candidate.lexeme, candidate.form)
                .and_then(|info| info.stem(&word))
                .is_some();
            if !fits {
                return Err(TurglemError::invalid_format(
                    name,
                    format!(
                        "line {line}: {:?} does not fit form {} of paradigm {}",
                        fields[0], candidate.form, candidate.lexeme
                    ),
                ));
            }
            lexicon.map.entry(word).or_default().push(candidate);
            lexicon.num_entries += 1;
        }
        Ok(lexicon)
    }
}

/// `word,paradigm,form` の1行を検証して読み取ります。
///
/// 予測テーブルも同じ形式です。語形への適合は呼び出し側で検査します。
pub(crate) fn parse_entry(
    name: &'static str,
    line: usize,
    fields: &[String],
    paradigms: &Paradigms,
) -> Result<(Vec<Letter>, Candidate)> {
    if fields.len() != 3 {
        return Err(TurglemError::invalid_format(
            name,
            format!("line {line}: 3 fields are expected, found {}", fields.len()),
        ));
    }
    let word = letter::decode(fields[0].as_bytes(), MAX_WORD_LETTERS)
        .map_err(|e| TurglemError::invalid_format(name, format!("line {line}: {e}")))?;
    if word.is_empty() || word.iter().any(|l| l.is_delim()) {
        return Err(TurglemError::invalid_format(
            name,
            format!("line {line}: invalid word {:?}", fields[0]),
        ));
    }
    let lexeme: LexemeId = parse_field(name, line, "paradigm", &fields[1])?;
    let form: FormIndex = parse_field(name, line, "form", &fields[2])?;

    if paradigms.form(lexeme, form).is_none() {
        return Err(TurglemError::invalid_format(
            name,
            format!("line {line}: paradigm {lexeme} has no form {form}"),
        ));
    }
    Ok((word, Candidate::new(lexeme, form)))
}
