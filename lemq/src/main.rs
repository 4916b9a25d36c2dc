//! 形態素問い合わせを実行するユーティリティ
//!
//! このバイナリは、コマンドライン引数または標準入力から読み込んだ単語を見出し語化し、
//! 指定されたモード（正規形、パラダイム）で結果を出力します。
//! `-g` モードでは、指定したグラメムをすべて持つ語形を辞書全体から検索します。

mod options;

use std::error::Error;
use std::io::{BufWriter, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use turglem::errors::TurglemError;
use turglem::{scan, Dictionary, OutputModes, QueryPipeline};

use crate::options::Args;

/// メイン関数
///
/// 辞書をロードし、単語ごとの結果を標準出力に書き出します。
/// 診断メッセージは標準エラー出力に書き出されます。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = args.query_options()?;
    // The mask is validated before the dictionary is touched.
    let mask = if options.modes().contains(OutputModes::GRAMMEME) {
        match args.grammeme_mask() {
            Ok(mask) => Some(mask),
            Err(e) => Args::command()
                .error(ErrorKind::ValueValidation, e)
                .exit(),
        }
    } else {
        None
    };

    tracing::debug!(dict = ?args.dict, "loading the dictionary");
    let dict = match Dictionary::load(&args.dict, &args.prediction, &args.paradigms) {
        Ok(dict) => dict,
        Err(e) => {
            eprintln!("{}", load_error_message(&e));
            std::process::exit(1);
        }
    };

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());

    if let Some(mask) = mask {
        scan::scan(&dict, mask, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let pipeline = QueryPipeline::new(&dict, options).flush_each_word(is_tty);
    if args.words.is_empty() {
        pipeline.process_lines(std::io::stdin().lock(), &mut out)?;
    } else {
        for word in &args.words {
            pipeline.process_word(word.as_bytes(), &mut out)?;
        }
    }
    out.flush()?;

    Ok(())
}

/// 辞書の読み込みエラーを、エンジンのエラーコード付きのメッセージにします。
fn load_error_message(e: &TurglemError) -> String {
    format!("{}: {e}", e.code())
}
