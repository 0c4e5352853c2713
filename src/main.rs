use clap::Parser;

use lsb_stego::{
    cli::{Cli, Commands},
    handler::{
        handle_capacity, handle_embed_image, handle_extract_image, handle_hide, handle_histogram,
        handle_recover,
    },
    logging::{self, LogConfig},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、安装日志输出，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    let log_handle = logging::init(&LogConfig {
        level: logging::level_from_flags(cli.verbose, cli.quiet),
        file: cli.log_file,
    })?;

    // 根据子命令调用相应的处理函数
    let result = match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Recover(args) => handle_recover(args),
        Commands::EmbedImage(args) => handle_embed_image(args),
        Commands::ExtractImage(args) => handle_extract_image(args),
        Commands::Histogram(args) => handle_histogram(args),
        Commands::Capacity(args) => handle_capacity(args),
    };

    log_handle.shutdown();
    result
}
