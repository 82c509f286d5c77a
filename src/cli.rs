use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iso3361-listing")]
#[command(about = "ISO-3361 国コード一覧の整形・パートナーエリア照合", long_about = None)]
pub struct Cli {
    /// 入力テキストファイル（省略時は実行ファイルの隣の ISO_3361_list.txt）
    pub text_file: Vec<PathBuf>,

    /// パートナーエリア表のJSONファイル
    #[arg(long)]
    pub partner_areas: Option<PathBuf>,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}
