//! グラメム集合のビットマスク表現
//!
//! 1つの語形が持つ文法特徴（格・数・性など）を、ID 0〜63 のビット集合として扱います。
//! テキスト表現は `,3,5,` のように先頭と各要素の後ろにカンマを置いた形式です。

use std::fmt;

use crate::errors::{Result, TurglemError};

/// グラメムIDの上限（この値を含まない）
pub const MAX_GRAMMEMES: u32 = u64::BITS;

/// グラメムのビット集合
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Debug)]
pub struct GrammemeMask(u64);

impl GrammemeMask {
    /// 空の集合
    pub const EMPTY: Self = Self(0);

    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// グラメム `k` を1つだけ含む集合を作成します。
    ///
    /// # エラー
    ///
    /// `k` が 0〜63 の範囲外の場合にエラーを返します。
    pub fn single(k: u32) -> Result<Self> {
        if k >= MAX_GRAMMEMES {
            return Err(TurglemError::invalid_argument(
                "grammeme",
                format!("{k} is out of range 0..{MAX_GRAMMEMES}"),
            ));
        }
        Ok(Self(1 << k))
    }

    /// グラメム `k` を含むかどうか
    #[inline(always)]
    pub const fn contains(self, k: u32) -> bool {
        k < MAX_GRAMMEMES && self.0 & (1 << k) != 0
    }

    /// `query` のすべての要素を含むかどうか
    ///
    /// 余分な要素があってもかまいません。
    #[inline(always)]
    pub const fn contains_all(self, query: Self) -> bool {
        self.0 & query.0 == query.0
    }

    /// 含まれるIDを昇順に返します。
    pub fn iter(self) -> impl Iterator<Item = u32> {
        (0..MAX_GRAMMEMES).filter(move |&k| self.contains(k))
    }

    /// 引数列からマスクを作成します。
    ///
    /// 各トークンは10進数のグラメムID（0〜63）として解釈され、結果はそれらの論理和です。
    /// 空のトークンは無視します。
    ///
    /// ```
    /// use turglem::grammeme::GrammemeMask;
    ///
    /// let mask = GrammemeMask::from_args(["5", "0"]).unwrap();
    /// assert_eq!(mask.bits(), 0b100001);
    /// assert_eq!(mask.to_string(), ",0,5,");
    ///
    /// assert!(GrammemeMask::from_args(["64"]).is_err());
    /// ```
    ///
    /// # エラー
    ///
    /// 数値として読めないトークン、または範囲外のIDがあればエラーを返します。
    pub fn from_args<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = Self::EMPTY;
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            let k: u32 = token.parse().map_err(|e| {
                TurglemError::invalid_argument("grammeme", format!("{token:?}: {e}"))
            })?;
            mask.0 |= Self::single(k)?.0;
        }
        Ok(mask)
    }
}

impl fmt::Display for GrammemeMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(",")?;
        for k in self.iter() {
            write!(f, "{k},")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for GrammemeMask {
    type Err = TurglemError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_args(s.split(','))
    }
}
