//! CSVソースから読み込む形態素辞書
//!
//! このモジュールは、[`MorphologyEngine`] の参照実装である [`Dictionary`] を提供します。
//! 辞書は次の3つのソースから構成されます:
//!
//! - 単語辞書 `dict.csv`: `word,paradigm,form`
//! - 予測テーブル `prediction.csv`: `suffix,paradigm,form`
//! - パラダイム表 `paradigms.csv`: `paradigm,form,prefix,ending,pos,grammemes`
//!
//! 拡張子が `.zst` のファイルはZstandardで展開してから読み込みます。
//!
//! # 例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use turglem::{Dictionary, MorphologyEngine};
//! use turglem::letter::{decode, MAX_WORD_LETTERS};
//!
//! let paradigms = "0,0,,а,1,\",2,10,\"\n0,1,,и,1,\",3,10,\"";
//! let dict = Dictionary::from_readers(
//!     "книга,0,0\nкниги,0,1".as_bytes(),
//!     "".as_bytes(),
//!     paradigms.as_bytes(),
//! )?;
//!
//! let word = decode("книги".as_bytes(), MAX_WORD_LETTERS)?;
//! let candidates = dict.lemmatize(&word, true);
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates[0].form, 1);
//! # Ok(())
//! # }
//! ```

pub(crate) mod lexicon;
pub(crate) mod paradigm;
pub(crate) mod prediction;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::engine::{Candidate, FormIndex, LexemeId, MorphologyEngine, PartOfSpeech};
use crate::errors::{CapacityError, LoadTarget, Result, TurglemError};
use crate::grammeme::GrammemeMask;
use crate::letter::{Letter, LetterBuf, LETTER_DELIM, MAX_WORD_LETTERS};

pub use crate::dictionary::lexicon::Lexicon;
pub use crate::dictionary::paradigm::{FormInfo, Paradigm, Paradigms};
pub use crate::dictionary::prediction::Prediction;

/// 列挙時のエントリ (`word|lexeme|form`) の最大文字数
///
/// 2つの区切り文字と、`u32` の10進表現2つ分を語の上限に加えた長さです。
pub const MAX_ENTRY_LETTERS: usize = MAX_WORD_LETTERS + 2 * (1 + 10);

/// パラダイムに基づく形態素辞書
pub struct Dictionary {
    lexicon: Lexicon,
    prediction: Prediction,
    paradigms: Paradigms,
}

impl Dictionary {
    /// 3つのファイルから辞書を読み込みます。
    ///
    /// # 引数
    ///
    /// * `dict_path` - 単語辞書
    /// * `prediction_path` - 予測テーブル
    /// * `paradigm_path` - パラダイム表
    ///
    /// # エラー
    ///
    /// いずれかのファイルが読めない、または形式が不正な場合に
    /// [`TurglemError::Load`] を返します。どのリソースで失敗したかは
    /// [`TurglemError::code`] で取得できます。
    pub fn load<D, P, Q>(dict_path: D, prediction_path: P, paradigm_path: Q) -> Result<Self>
    where
        D: AsRef<Path>,
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let dict_path = dict_path.as_ref();
        let prediction_path = prediction_path.as_ref();
        let paradigm_path = paradigm_path.as_ref();

        let paradigms = read_source(paradigm_path)
            .and_then(|text| Paradigms::parse_csv(&text, "paradigms.csv"))
            .map_err(|e| TurglemError::load(LoadTarget::Paradigms, paradigm_path, e))?;
        let lexicon = read_source(dict_path)
            .and_then(|text| Lexicon::parse_csv(&text, "dict.csv", &paradigms))
            .map_err(|e| TurglemError::load(LoadTarget::Dictionary, dict_path, e))?;
        let prediction = read_source(prediction_path)
            .and_then(|text| Prediction::parse_csv(&text, "prediction.csv", &paradigms))
            .map_err(|e| TurglemError::load(LoadTarget::Prediction, prediction_path, e))?;

        let dict = Self::from_parts(lexicon, prediction, paradigms);
        tracing::info!(
            entries = dict.lexicon.num_entries(),
            suffixes = dict.prediction.len(),
            paradigms = dict.paradigms.len(),
            "dictionary loaded"
        );
        Ok(dict)
    }

    /// リーダーから辞書を構築します。
    ///
    /// # 引数
    ///
    ///  - `dict_rdr`: 単語辞書 `dict.csv` のリーダー
    ///  - `prediction_rdr`: 予測テーブル `prediction.csv` のリーダー
    ///  - `paradigm_rdr`: パラダイム表 `paradigms.csv` のリーダー
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に [`TurglemError`] を返します。
    pub fn from_readers<D, P, Q>(
        mut dict_rdr: D,
        mut prediction_rdr: P,
        mut paradigm_rdr: Q,
    ) -> Result<Self>
    where
        D: Read,
        P: Read,
        Q: Read,
    {
        let mut buf = String::new();
        paradigm_rdr.read_to_string(&mut buf)?;
        let paradigms = Paradigms::parse_csv(&buf, "paradigms.csv")?;

        buf.clear();
        dict_rdr.read_to_string(&mut buf)?;
        let lexicon = Lexicon::parse_csv(&buf, "dict.csv", &paradigms)?;

        buf.clear();
        prediction_rdr.read_to_string(&mut buf)?;
        let prediction = Prediction::parse_csv(&buf, "prediction.csv", &paradigms)?;

        Ok(Self::from_parts(lexicon, prediction, paradigms))
    }

    /// 構築済みの部品から辞書を作成します。
    pub fn from_parts(lexicon: Lexicon, prediction: Prediction, paradigms: Paradigms) -> Self {
        Self {
            lexicon,
            prediction,
            paradigms,
        }
    }

    #[inline(always)]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    #[inline(always)]
    pub fn paradigms(&self) -> &Paradigms {
        &self.paradigms
    }

    fn predict(&self, word: &[Letter]) -> Vec<Candidate> {
        self.prediction
            .predict(word)
            .iter()
            .copied()
            .filter(|c| {
                // A guessed form must leave a non-empty stem behind.
                self.paradigms
                    .form(c.lexeme, c.form)
                    .is_some_and(|f| word.len() > f.affix_len() && f.stem(word).is_some())
            })
            .collect()
    }
}

impl MorphologyEngine for Dictionary {
    fn lemmatize(&self, word: &[Letter], use_prediction: bool) -> Vec<Candidate> {
        if word.is_empty() || word.contains(&LETTER_DELIM) {
            return vec![];
        }
        let found = self.lexicon.get(word);
        if !found.is_empty() {
            return found.to_vec();
        }
        if use_prediction {
            self.predict(word)
        } else {
            vec![]
        }
    }

    fn build_form(
        &self,
        word: &[Letter],
        lexeme: LexemeId,
        matched: FormIndex,
        target: FormIndex,
        out: &mut LetterBuf,
    ) -> Result<()> {
        let paradigm = self.paradigms.get(lexeme).ok_or_else(|| {
            TurglemError::invalid_argument("lexeme", format!("unknown paradigm {lexeme}"))
        })?;
        let (Some(src), Some(dst)) = (paradigm.form(matched), paradigm.form(target)) else {
            return Err(TurglemError::invalid_argument(
                "form",
                format!(
                    "paradigm {lexeme} has {} forms, requested {matched} -> {target}",
                    paradigm.len()
                ),
            ));
        };
        let stem = src.stem(word).ok_or_else(|| {
            TurglemError::invalid_argument(
                "word",
                format!("the word does not fit form {matched} of paradigm {lexeme}"),
            )
        })?;

        out.clear();
        out.extend_from_slice(dst.prefix())?;
        out.extend_from_slice(stem)?;
        out.extend_from_slice(dst.ending())?;
        Ok(())
    }

    #[inline(always)]
    fn form_count(&self, lexeme: LexemeId) -> usize {
        self.paradigms.form_count(lexeme)
    }

    #[inline(always)]
    fn grammemes(&self, lexeme: LexemeId, form: FormIndex) -> Option<GrammemeMask> {
        self.paradigms.form(lexeme, form).map(FormInfo::grammemes)
    }

    #[inline(always)]
    fn part_of_speech(&self, lexeme: LexemeId, form: FormIndex) -> Option<PartOfSpeech> {
        self.paradigms.form(lexeme, form).map(FormInfo::pos)
    }

    fn enumerate(&self, prefix: &[Letter], visit: &mut dyn FnMut(&[Letter])) {
        let mut entry = LetterBuf::new(MAX_ENTRY_LETTERS);
        for (word, candidates) in self.lexicon.iter_prefix(prefix) {
            for c in candidates {
                match write_entry(&mut entry, word, c) {
                    Ok(()) => visit(&entry),
                    Err(e) => tracing::debug!(error = %e, "entry skipped during enumeration"),
                }
            }
        }
    }
}

/// `word|lexeme|form` を `entry` に書き込みます。
fn write_entry(
    entry: &mut LetterBuf,
    word: &[Letter],
    c: &Candidate,
) -> Result<(), CapacityError> {
    entry.clear();
    entry.extend_from_slice(word)?;
    entry.push(LETTER_DELIM)?;
    entry.push_number(c.lexeme)?;
    entry.push(LETTER_DELIM)?;
    entry.push_number(u32::from(c.form))
}

/// ソースファイルをテキストとして読み込みます。
///
/// 拡張子が `.zst` ならZstandardとして展開します。
fn read_source(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut text = String::new();
    if path.extension().is_some_and(|ext| ext == "zst") {
        zstd::Decoder::new(file)?.read_to_string(&mut text)?;
    } else {
        let mut file = file;
        file.read_to_string(&mut text)?;
    }
    Ok(text)
}
