//! テキストとエンジン内部の文字列表現の相互変換
//!
//! エンジンは入力を UTF-8 のまま扱わず、固定アルファベット上の [`Letter`] の列として扱います。
//! このモジュールは、バイト列と [`Letter`] 列の変換、容量制限付きのバッファ、
//! および列挙結果 (`word|lexeme|form`) の区切りフィールドを扱う関数を提供します。
//!
//! アルファベットはロシア語小文字33字、ハイフン、ASCII数字、区切り文字 `|` で構成されます。
//! 大文字のキリル文字はデコード時に小文字へ畳み込まれます。

use std::fmt;
use std::ops::Deref;

use crate::errors::{CapacityError, EncodingError};

/// 1単語あたりの最大文字数
pub const MAX_WORD_LETTERS: usize = 1024;

/// 1単語をテキストに戻したときの最大バイト数
pub const MAX_TEXT_BYTES: usize = 1024;

const RUSSIAN_LOWER: [char; 33] = [
    'а', 'б', 'в', 'г', 'д', 'е', 'ё', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р',
    'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
];

const HYPHEN_ID: u8 = 34;
const DIGIT_BASE_ID: u8 = 35;

/// アルファベット上の1文字
///
/// 値 `0` は区切り文字 [`LETTER_DELIM`] に予約されています。
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct Letter(u8);

/// 区切り文字
pub const LETTER_DELIM: Letter = Letter(0);

impl Letter {
    /// アルファベットの大きさ
    pub const COUNT: usize = DIGIT_BASE_ID as usize + 10;

    /// 内部IDを返します。
    #[inline(always)]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Unicode文字を変換します。
    ///
    /// 大文字のキリル文字は対応する小文字になります。
    /// アルファベットに含まれない文字は `None` です。
    pub fn from_char(c: char) -> Option<Self> {
        let id = match c {
            '|' => 0,
            'а'..='е' => 1 + (c as u32 - 'а' as u32) as u8,
            'ё' | 'Ё' => 7,
            'ж'..='я' => 8 + (c as u32 - 'ж' as u32) as u8,
            'А'..='Е' => 1 + (c as u32 - 'А' as u32) as u8,
            'Ж'..='Я' => 8 + (c as u32 - 'Ж' as u32) as u8,
            '-' => HYPHEN_ID,
            '0'..='9' => DIGIT_BASE_ID + (c as u32 - '0' as u32) as u8,
            _ => return None,
        };
        Some(Self(id))
    }

    /// Unicode文字に戻します。
    pub const fn to_char(self) -> char {
        match self.0 {
            0 => '|',
            HYPHEN_ID => '-',
            id if id >= DIGIT_BASE_ID => (b'0' + (id - DIGIT_BASE_ID)) as char,
            id => RUSSIAN_LOWER[id as usize - 1],
        }
    }

    /// 数字なら値を返します。
    #[inline(always)]
    pub const fn digit(self) -> Option<u32> {
        if self.0 >= DIGIT_BASE_ID {
            Some((self.0 - DIGIT_BASE_ID) as u32)
        } else {
            None
        }
    }

    /// 区切り文字かどうか
    #[inline(always)]
    pub const fn is_delim(self) -> bool {
        self.0 == LETTER_DELIM.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// 上限付きの [`Letter`] バッファ
///
/// 上限を超える書き込みは [`CapacityError`] になり、バッファは変更されません。
#[derive(Clone, Debug)]
pub struct LetterBuf {
    letters: Vec<Letter>,
    limit: usize,
}

impl LetterBuf {
    /// 上限 `limit` の空バッファを作成します。
    pub fn new(limit: usize) -> Self {
        Self {
            letters: Vec::new(),
            limit,
        }
    }

    /// 上限
    #[inline(always)]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.letters.clear();
    }

    /// 1文字追加します。
    #[inline(always)]
    pub fn push(&mut self, letter: Letter) -> Result<(), CapacityError> {
        self.reserve_exact_within(1)?;
        self.letters.push(letter);
        Ok(())
    }

    /// 文字列を追加します。
    pub fn extend_from_slice(&mut self, letters: &[Letter]) -> Result<(), CapacityError> {
        self.reserve_exact_within(letters.len())?;
        self.letters.extend_from_slice(letters);
        Ok(())
    }

    /// 10進数を数字の列として追加します。
    pub fn push_number(&mut self, mut n: u32) -> Result<(), CapacityError> {
        let mut digits = [LETTER_DELIM; 10];
        let mut len = 0;
        loop {
            // n % 10 is always a valid digit.
            digits[len] = Letter(DIGIT_BASE_ID + (n % 10) as u8);
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        digits[..len].reverse();
        self.extend_from_slice(&digits[..len])
    }

    /// 中身を取り出します。
    pub fn into_vec(self) -> Vec<Letter> {
        self.letters
    }

    fn reserve_exact_within(&self, additional: usize) -> Result<(), CapacityError> {
        let required = self.letters.len() + additional;
        if required > self.limit {
            return Err(CapacityError {
                limit: self.limit,
                required,
            });
        }
        Ok(())
    }
}

impl Deref for LetterBuf {
    type Target = [Letter];

    #[inline(always)]
    fn deref(&self) -> &[Letter] {
        &self.letters
    }
}

/// UTF-8バイト列を [`Letter`] 列に変換します。
///
/// # 引数
///
/// * `bytes` - 変換元のバイト列
/// * `max_letters` - 出力の最大文字数
///
/// # エラー
///
/// 不正なUTF-8、アルファベット外の文字、または `max_letters` を超える入力の場合に
/// [`EncodingError`] を返します。途中で切り詰めることはしません。
pub fn decode(bytes: &[u8], max_letters: usize) -> Result<Vec<Letter>, EncodingError> {
    let text = std::str::from_utf8(bytes)?;
    let mut buf = LetterBuf::new(max_letters);
    for c in text.chars() {
        let letter = Letter::from_char(c).ok_or(EncodingError::UnsupportedChar(c))?;
        buf.push(letter)?;
    }
    Ok(buf.into_vec())
}

/// [`Letter`] 列をUTF-8バイト列に変換します。
///
/// # エラー
///
/// 出力が `max_bytes` を超える場合に [`CapacityError`] を返します。
pub fn encode(letters: &[Letter], max_bytes: usize) -> Result<Vec<u8>, CapacityError> {
    let mut out = Vec::with_capacity(letters.len() * 2);
    let mut tmp = [0; 4];
    for &letter in letters {
        let bytes = letter.to_char().encode_utf8(&mut tmp).as_bytes();
        let required = out.len() + bytes.len();
        if required > max_bytes {
            return Err(CapacityError {
                limit: max_bytes,
                required,
            });
        }
        out.extend_from_slice(bytes);
    }
    Ok(out)
}

/// 区切り文字で区切られたフィールドの先頭部分を返します。
///
/// 列挙結果は `word|lexeme|form` の形で複数のフィールドを含むため、
/// 表層形だけを表示するときは、テキストに戻す前にこの関数で最初のフィールドに切り詰めます。
/// 区切り文字がなければ入力全体を返します。
#[inline]
pub fn first_segment(letters: &[Letter]) -> &[Letter] {
    match letters.iter().position(|l| l.is_delim()) {
        Some(end) => &letters[..end],
        None => letters,
    }
}

/// 列挙結果の末尾2フィールドを `(lexeme, form)` として読み取ります。
///
/// ```
/// use turglem::letter::{decode, int_pair, MAX_WORD_LETTERS};
///
/// let entry = decode("книга|12|0".as_bytes(), MAX_WORD_LETTERS).unwrap();
/// assert_eq!(int_pair(&entry), Some((12, 0)));
/// ```
pub fn int_pair(letters: &[Letter]) -> Option<(u32, u32)> {
    let mut fields = letters.rsplitn(3, |l| l.is_delim());
    let second = parse_number(fields.next()?)?;
    let first = parse_number(fields.next()?)?;
    // The leading field (the word itself) must exist.
    fields.next()?;
    Some((first, second))
}

fn parse_number(letters: &[Letter]) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.iter().try_fold(0u32, |acc, l| {
        acc.checked_mul(10)?.checked_add(l.digit()?)
    })
}

/// デバッグ表示用に [`Letter`] 列を文字列にします。
pub fn to_string_lossy(letters: &[Letter]) -> String {
    letters.iter().map(|l| l.to_char()).collect()
}
