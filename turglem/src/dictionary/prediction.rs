//! 辞書にない語のための予測テーブル
//!
//! 語末から (語彙素, 語形) の組を引く表です。最も長く一致する語末だけを使います。

use hashbrown::HashMap;

use crate::dictionary::lexicon::parse_entry;
use crate::dictionary::paradigm::Paradigms;
use crate::engine::Candidate;
use crate::errors::Result;
use crate::letter::Letter;
use crate::utils::csv_records;

/// 語末による予測テーブル
#[derive(Default)]
pub struct Prediction {
    suffixes: HashMap<Vec<Letter>, Vec<Candidate>>,
    max_suffix_len: usize,
}

impl Prediction {
    /// `suffix,paradigm,form` 形式のテキストからテーブルを構築します。
    pub fn parse_csv(text: &str, name: &'static str, paradigms: &Paradigms) -> Result<Self> {
        let mut prediction = Self::default();
        for record in csv_records(text) {
            let (line, fields) = record?;
            let (suffix, candidate) = parse_entry(name, line, &fields, paradigms)?;
            prediction.max_suffix_len = prediction.max_suffix_len.max(suffix.len());
            prediction.suffixes.entry(suffix).or_default().push(candidate);
        }
        Ok(prediction)
    }

    /// 語末の種類数
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// `word` の真の語末（語全体を除く）のうち、最も長く一致するものの候補を返します。
    pub fn predict(&self, word: &[Letter]) -> &[Candidate] {
        let longest = self.max_suffix_len.min(word.len().saturating_sub(1));
        for len in (1..=longest).rev() {
            if let Some(candidates) = self.suffixes.get(&word[word.len() - len..]) {
                return candidates;
            }
        }
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::letter::{decode, MAX_WORD_LETTERS};

    #[test]
    fn test_longest_suffix_wins() {
        let paradigms =
            Paradigms::parse_csv("0,0,,а,1,\",2,\"\n1,0,,,1,\",2,\"", "paradigms.csv").unwrap();
        let prediction =
            Prediction::parse_csv("а,1,0\nга,0,0", "prediction.csv", &paradigms).unwrap();
        assert_eq!(prediction.len(), 2);

        let word = decode("мотыга".as_bytes(), MAX_WORD_LETTERS).unwrap();
        assert_eq!(prediction.predict(&word), &[Candidate::new(0, 0)]);

        let word = decode("рама".as_bytes(), MAX_WORD_LETTERS).unwrap();
        assert_eq!(prediction.predict(&word), &[Candidate::new(1, 0)]);
    }

    #[test]
    fn test_whole_word_is_not_a_suffix() {
        let paradigms = Paradigms::parse_csv("0,0,,а,1,\",2,\"", "paradigms.csv").unwrap();
        let prediction = Prediction::parse_csv("га,0,0", "prediction.csv", &paradigms).unwrap();
        let word = decode("га".as_bytes(), MAX_WORD_LETTERS).unwrap();
        assert!(prediction.predict(&word).is_empty());
        assert!(prediction.predict(&[]).is_empty());
    }
}
