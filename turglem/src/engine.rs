//! 形態素エンジンの機能インターフェース
//!
//! 問い合わせパイプラインは、具体的な辞書実装ではなく [`MorphologyEngine`] を通して
//! エンジンを利用します。読み込みは実装側のコンストラクタ、解放は `Drop` が担います。

use crate::errors::Result;
use crate::grammeme::GrammemeMask;
use crate::letter::{Letter, LetterBuf};

/// 語彙素（パラダイム）のID
pub type LexemeId = u32;

/// パラダイム内の語形インデックス
pub type FormIndex = u16;

/// 品詞タグ
pub type PartOfSpeech = u8;

/// 見出し語化の候補
///
/// 「入力語は語彙素 `lexeme` の語形 `form` に一致する」ことを表します。
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Candidate {
    pub lexeme: LexemeId,
    pub form: FormIndex,
}

impl Candidate {
    #[inline(always)]
    pub const fn new(lexeme: LexemeId, form: FormIndex) -> Self {
        Self { lexeme, form }
    }
}

/// 形態素エンジンが提供する機能
///
/// すべての呼び出しは同期的で、エンジンは内部状態を変更しません。
pub trait MorphologyEngine {
    /// 語を見出し語化し、候補をエンジンの順序で返します。
    ///
    /// 辞書にない語は `use_prediction` が真のとき予測で補います。
    /// 一致がなければ空の列を返します。
    fn lemmatize(&self, word: &[Letter], use_prediction: bool) -> Vec<Candidate>;

    /// `word` を語彙素 `lexeme` の語形 `matched` とみなし、語形 `target` を `out` に生成します。
    ///
    /// `out` は事前にクリアされます。
    ///
    /// # エラー
    ///
    /// 語形が存在しない、`word` が `matched` に適合しない、または `out` の容量を超える場合。
    fn build_form(
        &self,
        word: &[Letter],
        lexeme: LexemeId,
        matched: FormIndex,
        target: FormIndex,
        out: &mut LetterBuf,
    ) -> Result<()>;

    /// 語彙素の語形数を返します。未知の語彙素は `0` です。
    fn form_count(&self, lexeme: LexemeId) -> usize;

    /// 語形のグラメム集合
    fn grammemes(&self, lexeme: LexemeId, form: FormIndex) -> Option<GrammemeMask>;

    /// 語形の品詞
    fn part_of_speech(&self, lexeme: LexemeId, form: FormIndex) -> Option<PartOfSpeech>;

    /// `prefix` で始まる全エントリを走査し、各エントリについて `visit` を呼び出します。
    ///
    /// エントリは `word|lexeme|form` の形の [`Letter`] 列として渡されます。
    fn enumerate(&self, prefix: &[Letter], visit: &mut dyn FnMut(&[Letter]));
}

impl<E> MorphologyEngine for &E
where
    E: MorphologyEngine + ?Sized,
{
    #[inline(always)]
    fn lemmatize(&self, word: &[Letter], use_prediction: bool) -> Vec<Candidate> {
        (**self).lemmatize(word, use_prediction)
    }

    #[inline(always)]
    fn build_form(
        &self,
        word: &[Letter],
        lexeme: LexemeId,
        matched: FormIndex,
        target: FormIndex,
        out: &mut LetterBuf,
    ) -> Result<()> {
        (**self).build_form(word, lexeme, matched, target, out)
    }

    #[inline(always)]
    fn form_count(&self, lexeme: LexemeId) -> usize {
        (**self).form_count(lexeme)
    }

    #[inline(always)]
    fn grammemes(&self, lexeme: LexemeId, form: FormIndex) -> Option<GrammemeMask> {
        (**self).grammemes(lexeme, form)
    }

    #[inline(always)]
    fn part_of_speech(&self, lexeme: LexemeId, form: FormIndex) -> Option<PartOfSpeech> {
        (**self).part_of_speech(lexeme, form)
    }

    #[inline(always)]
    fn enumerate(&self, prefix: &[Letter], visit: &mut dyn FnMut(&[Letter])) {
        (**self).enumerate(prefix, visit)
    }
}
