//! グラメムによる辞書全体の検索
//!
//! 辞書の全エントリを列挙し、指定したグラメムをすべて持つ語形を書き出します。
//! 列挙のコールバックは、エンジンとマスクを束ねた [`ScanContext`] だけを参照します。

use std::io::{self, Write};

use crate::engine::{FormIndex, LexemeId, MorphologyEngine, PartOfSpeech};
use crate::errors::Result;
use crate::grammeme::GrammemeMask;
use crate::letter::{self, Letter, MAX_TEXT_BYTES};
use crate::query::write_row;

/// 検索に一致したエントリ
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanMatch {
    pub lexeme: LexemeId,
    pub form: FormIndex,
    pub grammemes: GrammemeMask,
    pub pos: PartOfSpeech,
}

/// 列挙のコールバックに渡す不変のコンテキスト
pub struct ScanContext<'a, E: ?Sized> {
    engine: &'a E,
    mask: GrammemeMask,
}

impl<'a, E> ScanContext<'a, E>
where
    E: MorphologyEngine + ?Sized,
{
    pub fn new(engine: &'a E, mask: GrammemeMask) -> Self {
        Self { engine, mask }
    }

    #[inline(always)]
    pub fn mask(&self) -> GrammemeMask {
        self.mask
    }

    /// エントリ `word|lexeme|form` がマスクに一致するか判定します。
    ///
    /// 一致条件は `(entry & mask) == mask` です。
    pub fn matches(&self, entry: &[Letter]) -> Option<ScanMatch> {
        let (lexeme, form) = letter::int_pair(entry)?;
        let form = FormIndex::try_from(form).ok()?;
        let grammemes = self.engine.grammemes(lexeme, form)?;
        if !grammemes.contains_all(self.mask) {
            return None;
        }
        let pos = self.engine.part_of_speech(lexeme, form)?;
        Some(ScanMatch {
            lexeme,
            form,
            grammemes,
            pos,
        })
    }

    /// 一致したエントリを1行書き出します。書き出したら `true` を返します。
    pub fn write_entry<W>(&self, entry: &[Letter], out: &mut W) -> io::Result<bool>
    where
        W: Write,
    {
        let Some(m) = self.matches(entry) else {
            return Ok(false);
        };
        // Enumerated entries carry `|lexeme|form` after the word.
        let word = letter::first_segment(entry);
        let text = match letter::encode(word, MAX_TEXT_BYTES) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, lexeme = m.lexeme, form = m.form, "entry skipped");
                return Ok(false);
            }
        };
        write_row(out, m.lexeme, m.form, m.grammemes, m.pos, &text, None)?;
        Ok(true)
    }
}

/// 辞書全体から `mask` を含む語形を検索し、`out` に書き出します。
///
/// 戻り値は書き出した行数です。順序はエンジンの列挙順に従います。
///
/// # エラー
///
/// `out` への書き込みに失敗した場合にエラーを返します。
/// 最初の失敗以降のエントリは書き出されません。
pub fn scan<E, W>(engine: &E, mask: GrammemeMask, out: &mut W) -> Result<usize>
where
    E: MorphologyEngine + ?Sized,
    W: Write,
{
    let ctx = ScanContext::new(engine, mask);
    let mut count = 0;
    let mut error = None;
    engine.enumerate(&[], &mut |entry: &[Letter]| {
        if error.is_some() {
            return;
        }
        match ctx.write_entry(entry, out) {
            Ok(true) => count += 1,
            Ok(false) => {}
            Err(e) => error = Some(e),
        }
    });
    if let Some(e) = error {
        return Err(e.into());
    }
    tracing::debug!(mask = %mask, count, "scan finished");
    Ok(count)
}
