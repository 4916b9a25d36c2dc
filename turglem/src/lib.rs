//! # Turglem
//!
//! Turglemは、パラダイム（語形変化表）に基づくロシア語の見出し語化ライブラリと、
//! その上に構築された形態素問い合わせパイプラインです。
//!
//! ## 概要
//!
//! - **文字列表現**: UTF-8テキストとエンジン内部の固定アルファベット列の相互変換
//! - **見出し語化**: 辞書引きと、辞書にない語のための語末予測
//! - **語形生成**: 一致した語形から、同じパラダイムの任意の語形を生成
//! - **グラメム検索**: 指定した文法特徴をすべて持つ語形を辞書全体から検索
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use turglem::{Dictionary, OutputModes, QueryOptions, QueryPipeline};
//!
//! let paradigms = "0,0,,а,1,\",2,10,12,\"
//! 0,1,,и,1,\",3,10,12,\"
//! 0,2,,е,1,\",4,10,12,\"";
//! let dict = Dictionary::from_readers(
//!     "книга,0,0\nкниги,0,1\nкниге,0,2".as_bytes(),
//!     "".as_bytes(),
//!     paradigms.as_bytes(),
//! )?;
//!
//! let options = QueryOptions::new(OutputModes::NORMAL_FORM, true)?;
//! let pipeline = QueryPipeline::new(&dict, options);
//!
//! let mut out = vec![];
//! pipeline.process_word("книги".as_bytes(), &mut out)?;
//! assert_eq!(out, "книга\n".as_bytes());
//! # Ok(())
//! # }
//! ```

/// CSVソースから読み込む形態素辞書
pub mod dictionary;

/// 形態素エンジンの機能インターフェース
pub mod engine;

/// エラー型の定義
pub mod errors;

/// グラメム集合
pub mod grammeme;

/// テキストと内部文字列表現の変換
pub mod letter;

/// 単語ごとの問い合わせパイプライン
pub mod query;

/// グラメムによる辞書全体の検索
pub mod scan;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-exports
pub use dictionary::Dictionary;
pub use engine::{Candidate, MorphologyEngine};
pub use grammeme::GrammemeMask;
pub use query::{OutputModes, QueryOptions, QueryPipeline};
