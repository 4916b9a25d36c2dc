//! 単語ごとの問い合わせパイプライン
//!
//! 入力語を [`Letter`](crate::letter::Letter) 列に変換し、エンジンで見出し語化して、
//! 要求された出力モード（正規形、パラダイム）に従って行を書き出します。
//!
//! 1つの語・候補・語形で起きた失敗はその場で読み飛ばし、残りの処理は続行します。
//! 処理を中断するのは出力先のI/Oエラーだけです。

use std::io::{self, BufRead, Write};
use std::ops::{BitOr, BitOrAssign};

use crate::engine::{Candidate, FormIndex, LexemeId, MorphologyEngine, PartOfSpeech};
use crate::errors::{Result, TurglemError};
use crate::grammeme::GrammemeMask;
use crate::letter::{self, Letter, LetterBuf, MAX_TEXT_BYTES, MAX_WORD_LETTERS};

/// 出力モードの集合
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug)]
pub struct OutputModes(u8);

impl OutputModes {
    /// 空集合
    pub const NONE: Self = Self(0);
    /// 正規形を表示する
    pub const NORMAL_FORM: Self = Self(1 << 0);
    /// パラダイム全体を表示する
    pub const PARADIGM: Self = Self(1 << 1);
    /// グラメムで辞書全体を検索する。他のモードより優先されます。
    pub const GRAMMEME: Self = Self(1 << 2);

    #[inline(always)]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for OutputModes {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputModes {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// 問い合わせの設定
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryOptions {
    modes: OutputModes,
    use_prediction: bool,
}

impl QueryOptions {
    /// 新しい設定を作成します。
    ///
    /// # エラー
    ///
    /// `modes` が空の場合にエラーを返します。
    pub fn new(modes: OutputModes, use_prediction: bool) -> Result<Self> {
        if modes.is_empty() {
            return Err(TurglemError::invalid_argument(
                "modes",
                "at least one output mode must be requested",
            ));
        }
        Ok(Self {
            modes,
            use_prediction,
        })
    }

    #[inline(always)]
    pub fn modes(&self) -> OutputModes {
        self.modes
    }

    #[inline(always)]
    pub fn use_prediction(&self) -> bool {
        self.use_prediction
    }
}

/// 単語ごとに見出し語化と出力を行うパイプライン
pub struct QueryPipeline<E> {
    engine: E,
    options: QueryOptions,
    flush_each_word: bool,
}

impl<E> QueryPipeline<E>
where
    E: MorphologyEngine,
{
    pub fn new(engine: E, options: QueryOptions) -> Self {
        Self {
            engine,
            options,
            flush_each_word: false,
        }
    }

    /// 1語を処理するたびに出力をフラッシュするかどうかを設定します。
    ///
    /// 出力先が端末のときに有効にします。
    pub fn flush_each_word(mut self, yes: bool) -> Self {
        self.flush_each_word = yes;
        self
    }

    /// 1語を処理して、要求された行を `out` に書き出します。
    ///
    /// 変換できない語や辞書にない語は何も出力しません。
    ///
    /// # エラー
    ///
    /// `out` への書き込みに失敗した場合のみエラーを返します。
    pub fn process_word<W>(&self, word: &[u8], out: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        let letters = match letter::decode(word, MAX_WORD_LETTERS) {
            Ok(letters) => letters,
            Err(e) => {
                tracing::debug!(error = %e, word = %String::from_utf8_lossy(word), "word skipped");
                return Ok(());
            }
        };

        let candidates = self
            .engine
            .lemmatize(&letters, self.options.use_prediction);
        if candidates.is_empty() {
            tracing::trace!(word = %String::from_utf8_lossy(word), "no candidates");
            return Ok(());
        }

        let mut buf = LetterBuf::new(MAX_WORD_LETTERS);
        let modes = self.options.modes;
        if modes.contains(OutputModes::NORMAL_FORM) {
            self.write_normal_forms(&letters, &candidates, &mut buf, out)?;
        }
        if modes.contains(OutputModes::PARADIGM) {
            for &candidate in &candidates {
                self.write_paradigm(&letters, candidate, &mut buf, out)?;
            }
        }

        if self.flush_each_word {
            out.flush()?;
        }
        Ok(())
    }

    /// 入力を1行1語として終端まで処理します。
    ///
    /// 各行は最初の `\r` または `\n` で切り詰められます。
    pub fn process_lines<R, W>(&self, mut rdr: R, out: &mut W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let mut line = vec![];
        loop {
            line.clear();
            if rdr.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let end = line
                .iter()
                .position(|&b| b == b'\r' || b == b'\n')
                .unwrap_or(line.len());
            self.process_word(&line[..end], out)?;
        }
        Ok(())
    }

    /// 全候補の正規形を `|` で連結した1行を書き出します。
    fn write_normal_forms<W>(
        &self,
        word: &[Letter],
        candidates: &[Candidate],
        buf: &mut LetterBuf,
        out: &mut W,
    ) -> io::Result<()>
    where
        W: Write,
    {
        let mut written = 0;
        for &candidate in candidates {
            let text = match self.render_form(word, candidate, 0, buf) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(error = %e, ?candidate, "normal form skipped");
                    continue;
                }
            };
            if written != 0 {
                out.write_all(b"|")?;
            }
            out.write_all(&text)?;
            written += 1;
        }
        if written != 0 {
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// 候補の語彙素の全語形を1行ずつ書き出します。
    fn write_paradigm<W>(
        &self,
        word: &[Letter],
        candidate: Candidate,
        buf: &mut LetterBuf,
        out: &mut W,
    ) -> io::Result<()>
    where
        W: Write,
    {
        let count = self.engine.form_count(candidate.lexeme);
        for j in 0..count {
            let Ok(form) = FormIndex::try_from(j) else {
                break;
            };
            let lexeme = candidate.lexeme;
            let (Some(grammemes), Some(pos)) = (
                self.engine.grammemes(lexeme, form),
                self.engine.part_of_speech(lexeme, form),
            ) else {
                tracing::debug!(lexeme, form, "paradigm row without metadata skipped");
                continue;
            };
            let text = match self.render_form(word, candidate, form, buf) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(error = %e, lexeme, form, "paradigm row skipped");
                    continue;
                }
            };
            write_row(
                out,
                lexeme,
                form,
                grammemes,
                pos,
                &text,
                Some(form == candidate.form),
            )?;
        }
        Ok(())
    }

    /// 候補の語形 `target` を生成してテキストにします。
    fn render_form(
        &self,
        word: &[Letter],
        candidate: Candidate,
        target: FormIndex,
        buf: &mut LetterBuf,
    ) -> Result<Vec<u8>> {
        self.engine
            .build_form(word, candidate.lexeme, candidate.form, target, buf)?;
        Ok(letter::encode(buf, MAX_TEXT_BYTES)?)
    }
}

/// パラダイム・検索結果の1行を書き出します。
///
/// `matched` が `Some` のときは、入力語に一致した語形かどうかを示す印 (`*`) を末尾に付けます。
pub(crate) fn write_row<W>(
    out: &mut W,
    lexeme: LexemeId,
    form: FormIndex,
    grammemes: GrammemeMask,
    pos: PartOfSpeech,
    text: &[u8],
    matched: Option<bool>,
) -> io::Result<()>
where
    W: Write,
{
    write!(out, "{lexeme:8}  {form:4}  {grammemes}  {pos:3}  ")?;
    out.write_all(text)?;
    match matched {
        Some(true) => out.write_all(b" *\n"),
        Some(false) => out.write_all(b"  \n"),
        None => out.write_all(b"\n"),
    }
}
