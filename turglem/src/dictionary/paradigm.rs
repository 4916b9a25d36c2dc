//! パラダイム表
//!
//! 各パラダイムは、語形ごとの接頭辞・語尾・品詞・グラメム集合の列です。
//! 語幹に接頭辞と語尾を付けることで、任意の語形を組み立てられます。

use hashbrown::HashMap;

use crate::engine::{FormIndex, LexemeId, PartOfSpeech};
use crate::errors::{Result, TurglemError};
use crate::grammeme::GrammemeMask;
use crate::letter::{self, Letter, MAX_WORD_LETTERS};
use crate::utils::{csv_records, parse_field};

/// パラダイム内の1語形
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormInfo {
    prefix: Vec<Letter>,
    ending: Vec<Letter>,
    pos: PartOfSpeech,
    grammemes: GrammemeMask,
}

impl FormInfo {
    #[inline(always)]
    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    #[inline(always)]
    pub fn grammemes(&self) -> GrammemeMask {
        self.grammemes
    }

    /// `word` がこの語形に適合すれば語幹を返します。
    ///
    /// 語幹は空であってもかまいません。
    pub fn stem<'a>(&self, word: &'a [Letter]) -> Option<&'a [Letter]> {
        word.strip_prefix(self.prefix.as_slice())?
            .strip_suffix(self.ending.as_slice())
    }

    /// 接頭辞と語尾を語幹に付けた長さ
    #[inline(always)]
    pub fn affix_len(&self) -> usize {
        self.prefix.len() + self.ending.len()
    }

    #[inline(always)]
    pub(crate) fn prefix(&self) -> &[Letter] {
        &self.prefix
    }

    #[inline(always)]
    pub(crate) fn ending(&self) -> &[Letter] {
        &self.ending
    }
}

/// 1つのパラダイム
#[derive(Clone, Debug, Default)]
pub struct Paradigm {
    forms: Vec<FormInfo>,
}

impl Paradigm {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    #[inline(always)]
    pub fn form(&self, form: FormIndex) -> Option<&FormInfo> {
        self.forms.get(usize::from(form))
    }
}

/// パラダイム表
#[derive(Default)]
pub struct Paradigms {
    paradigms: HashMap<LexemeId, Paradigm>,
}

impl Paradigms {
    #[inline(always)]
    pub fn get(&self, lexeme: LexemeId) -> Option<&Paradigm> {
        self.paradigms.get(&lexeme)
    }

    #[inline(always)]
    pub fn form(&self, lexeme: LexemeId, form: FormIndex) -> Option<&FormInfo> {
        self.get(lexeme)?.form(form)
    }

    #[inline(always)]
    pub fn form_count(&self, lexeme: LexemeId) -> usize {
        self.get(lexeme).map_or(0, Paradigm::len)
    }

    /// パラダイムの数
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.paradigms.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.paradigms.is_empty()
    }

    /// `paradigms.csv` 形式のテキストから表を構築します。
    ///
    /// 各行は `paradigm,form,prefix,ending,pos,grammemes` です。
    /// `grammemes` は `",2,10,"` のようなグラメム集合のテキスト表現です。
    ///
    /// # エラー
    ///
    /// 行の形式が不正な場合、同じ語形が重複する場合、
    /// またはあるパラダイムの語形インデックスが 0 から連続していない場合にエラーを返します。
    pub fn parse_csv(text: &str, name: &'static str) -> Result<Self> {
        let mut slots: HashMap<LexemeId, Vec<Option<FormInfo>>> = HashMap::new();

        for record in csv_records(text) {
            let (line, fields) = record?;
            if fields.len() != 6 {
                return Err(TurglemError::invalid_format(
                    name,
                    format!("line {line}: 6 fields are expected, found {}", fields.len()),
                ));
            }
            let lexeme: LexemeId = parse_field(name, line, "paradigm", &fields[0])?;
            let form: FormIndex = parse_field(name, line, "form", &fields[1])?;
            let prefix = parse_affix(name, line, &fields[2])?;
            let ending = parse_affix(name, line, &fields[3])?;
            let pos: PartOfSpeech = parse_field(name, line, "pos", &fields[4])?;
            let grammemes: GrammemeMask = fields[5].parse().map_err(|e| {
                TurglemError::invalid_format(name, format!("line {line}: grammemes: {e}"))
            })?;

            let forms = slots.entry(lexeme).or_default();
            let i = usize::from(form);
            if forms.len() <= i {
                forms.resize(i + 1, None);
            }
            if forms[i].is_some() {
                return Err(TurglemError::invalid_format(
                    name,
                    format!("line {line}: form {form} of paradigm {lexeme} is defined twice"),
                ));
            }
            forms[i] = Some(FormInfo {
                prefix,
                ending,
                pos,
                grammemes,
            });
        }

        let mut paradigms = HashMap::with_capacity(slots.len());
        for (lexeme, forms) in slots {
            let forms = forms
                .into_iter()
                .enumerate()
                .map(|(i, f)| {
                    f.ok_or_else(|| {
                        TurglemError::invalid_format(
                            name,
                            format!("form {i} of paradigm {lexeme} is missing"),
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            paradigms.insert(lexeme, Paradigm { forms });
        }

        Ok(Self { paradigms })
    }
}

fn parse_affix(name: &'static str, line: usize, value: &str) -> Result<Vec<Letter>> {
    let letters = letter::decode(value.as_bytes(), MAX_WORD_LETTERS)
        .map_err(|e| TurglemError::invalid_format(name, format!("line {line}: {e}")))?;
    if letters.iter().any(|l| l.is_delim() || l.digit().is_some()) {
        return Err(TurglemError::invalid_format(
            name,
            format!("line {line}: affix {value:?} contains a delimiter or a digit"),
        ));
    }
    Ok(letters)
}
