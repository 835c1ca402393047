use anyhow::Result;
use log::{debug, error, info, LevelFilter};
use std::process;

mod cli;
mod error;
mod progress;
mod report;
mod size;
mod target;

use cli::{Invocation, RunOptions};
use error::FsizeError;
use progress::ScanProgress;
use target::EntryKind;

fn main() {
    let invocation = match cli::parse(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            init_logger(false);
            fail(&e.into());
        }
    };

    let result = match invocation {
        Invocation::Help => {
            cli::print_help();
            Ok(())
        }
        Invocation::Version => {
            println!("fsize {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Invocation::Run(opts) => {
            init_logger(opts.verbose);
            execute(opts)
        }
    };

    match result {
        Ok(_) => process::exit(0),
        Err(e) => fail(&e),
    }
}

fn init_logger(verbose: bool) {
    // 默认不输出日志，RUST_LOG 或 -v 可以打开
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn execute(opts: RunOptions) -> Result<()> {
    let target = &opts.target;
    debug!("目标: {:?}", target);

    let kind = target.validate()?;

    let info = if opts.progress && kind == EntryKind::Directory {
        let mut progress = ScanProgress::new()?;
        let info = size::calculate_with(&target.path, kind, |len| progress.record(len))?;
        debug!("扫描了 {} 个文件, {} 字节", progress.files(), progress.bytes());
        progress.finish();
        info
    } else {
        size::calculate(&target.path, kind)?
    };
    info!("{} 共 {} 字节", target.path.display(), info.total_bytes);

    report::print_report(&target.path, kind, &info)?;
    Ok(())
}

fn fail(err: &anyhow::Error) -> ! {
    error!("操作失败: {:#}", err);

    match err.downcast_ref::<FsizeError>() {
        Some(FsizeError::Usage(e)) => eprint!("{}", e),
        Some(FsizeError::NoArguments) => {
            eprintln!("Error: {}", err);
            cli::print_help();
        }
        _ => eprintln!("Error: {:#}", err),
    }

    process::exit(1);
}
