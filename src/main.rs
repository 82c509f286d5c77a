use clap::Parser;
use iso3361_listing::{cli::Cli, listing};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 位置引数が2個以上のときはusageだけ出して正常終了する
    if cli.text_file.len() > 1 {
        println!("iso3361-listing [text_file]");
        return ExitCode::SUCCESS;
    }

    let name = cli
        .text_file
        .into_iter()
        .next()
        .unwrap_or_else(|| listing::exe_dir().join(listing::ISO_3361_LIST_FILE));

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    match listing::run_list(
        &mut out,
        &mut err,
        &name,
        cli.partner_areas.as_deref(),
        cli.verbose,
    ) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}
