//! コマンドライン引数
//!
//! 出力モード、予測の有無、辞書ファイルの場所を定義します。
//! モードは少なくとも1つ指定する必要があります。

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use turglem::errors::Result;
use turglem::{GrammemeMask, OutputModes, QueryOptions};

/// 辞書ファイルの既定のインストール先
const DEFAULT_PREFIX: &str = match option_env!("TURGLEM_INSTALL_PREFIX") {
    Some(prefix) => prefix,
    None => "/usr/local",
};

fn default_source(name: &str) -> PathBuf {
    [DEFAULT_PREFIX, "share", "turglem", "russian", name]
        .iter()
        .collect()
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "lemq", version, about = "Lemmatizes Russian words and queries their paradigms")]
#[clap(group(ArgGroup::new("mode").required(true).multiple(true)))]
pub struct Args {
    /// Prints the normal form of each word.
    #[clap(short = 'n', long, group = "mode")]
    pub nform: bool,

    /// Prints the full paradigm of each word.
    #[clap(short = 'p', long, group = "mode")]
    pub paradigm: bool,

    /// Lists every dictionary form carrying all the given grammemes.
    #[clap(short = 'g', long, group = "mode")]
    pub grammem: bool,

    /// Disables the prediction of unknown words.
    #[clap(short = 'P', long)]
    pub no_prediction: bool,

    /// Word dictionary (`.zst` sources are decompressed).
    #[clap(long, env = "TURGLEM_DICT", default_value_os_t = default_source("dict.csv"))]
    pub dict: PathBuf,

    /// Suffix prediction table.
    #[clap(
        long,
        env = "TURGLEM_PREDICTION",
        default_value_os_t = default_source("prediction.csv")
    )]
    pub prediction: PathBuf,

    /// Paradigm table.
    #[clap(
        long,
        env = "TURGLEM_PARADIGMS",
        default_value_os_t = default_source("paradigms.csv")
    )]
    pub paradigms: PathBuf,

    /// Words to process, or grammeme ids with `-g`. Reads stdin when omitted.
    pub words: Vec<String>,
}

impl Args {
    /// 指定された出力モードの集合
    pub fn modes(&self) -> OutputModes {
        let mut modes = OutputModes::NONE;
        if self.nform {
            modes |= OutputModes::NORMAL_FORM;
        }
        if self.paradigm {
            modes |= OutputModes::PARADIGM;
        }
        if self.grammem {
            modes |= OutputModes::GRAMMEME;
        }
        modes
    }

    pub fn query_options(&self) -> Result<QueryOptions> {
        QueryOptions::new(self.modes(), !self.no_prediction)
    }

    /// `-g` の位置引数からマスクを作ります。
    pub fn grammeme_mask(&self) -> Result<GrammemeMask> {
        GrammemeMask::from_args(&self.words)
    }
}
