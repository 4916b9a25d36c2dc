//! エラー型の定義
//!
//! このモジュールは、Turglemライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Turglem専用のResult型
///
/// エラー型としてデフォルトで[`TurglemError`]を使用します。
pub type Result<T, E = TurglemError> = std::result::Result<T, E>;

/// Turglemのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum TurglemError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 固定容量バッファのあふれ
    ///
    /// [`CapacityError`]のエラーバリアント。
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// 文字集合に含まれないテキスト
    ///
    /// [`EncodingError`]のエラーバリアント。
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// 辞書リソースの読み込み失敗
    ///
    /// どのリソースで失敗したかを [`LoadTarget`] で保持します。
    #[error("failed to load the {target} from {path:?}: {source}")]
    Load {
        /// 失敗したリソース
        target: LoadTarget,
        /// リソースのパス
        path: PathBuf,
        /// 根本原因
        #[source]
        source: Box<TurglemError>,
    },

    /// 標準I/Oエラー
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TurglemError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 読み込みエラーでラップします
    pub(crate) fn load<P>(target: LoadTarget, path: P, source: Self) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::Load {
            target,
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// エンジンのエラーコードを返します
    ///
    /// 読み込みエラーの場合は [`LoadTarget::code`]、それ以外は `0` です。
    pub fn code(&self) -> i32 {
        match self {
            Self::Load { target, .. } => target.code(),
            _ => 0,
        }
    }
}

/// 読み込み対象のリソース
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadTarget {
    /// 単語辞書
    Dictionary,
    /// 予測テーブル
    Prediction,
    /// パラダイム表
    Paradigms,
}

impl LoadTarget {
    /// エラーコード
    pub const fn code(self) -> i32 {
        match self {
            Self::Dictionary => 1,
            Self::Prediction => 2,
            Self::Paradigms => 3,
        }
    }
}

impl fmt::Display for LoadTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Dictionary => write!(f, "dictionary"),
            Self::Prediction => write!(f, "prediction table"),
            Self::Paradigms => write!(f, "paradigm table"),
        }
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 固定容量のバッファに収まらない場合のエラー
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("CapacityError: {required} exceeds the limit of {limit}")]
pub struct CapacityError {
    /// 上限
    pub limit: usize,

    /// 必要とされた長さ（少なくとも）
    pub required: usize,
}

/// テキストと文字列表現の変換エラー
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum EncodingError {
    /// UTF-8として不正なバイト列
    #[error("EncodingError: invalid UTF-8 at byte {0}")]
    Utf8(usize),

    /// アルファベットに含まれない文字
    #[error("EncodingError: unsupported character {0:?}")]
    UnsupportedChar(char),

    /// 容量超過
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

impl From<std::str::Utf8Error> for EncodingError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Utf8(error.valid_up_to())
    }
}
