use bookmarkd::cli::Cli;
use bookmarkd::config::{StaticConfig, get_config, init_config};
use bookmarkd::errors::BookmarkError;
use bookmarkd::runtime::modes;
use bookmarkd::system::logging::init_logging;
use clap::Parser;

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();

    if cli.generate_config {
        println!("{}", StaticConfig::generate_sample_config());
        return;
    }

    // .env 需要在读取配置之前加载
    dotenvy::dotenv().ok();

    init_config(cli.config.as_deref());
    let config = get_config();

    // guard 必须存活到进程结束，否则日志不会刷新
    let _guard = init_logging(&config.logging);

    if let Err(e) = modes::run_server().await {
        match e.downcast_ref::<BookmarkError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("{:#}", e),
        }
        std::process::exit(1);
    }
}
