use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{App, Arg, ArgMatches};

use crate::error::FsizeError;
use crate::target::{ExplicitKind, TargetSpec};

/// 解析命令行后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Run(RunOptions),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub target: TargetSpec,
    pub progress: bool,
    pub verbose: bool,
}

pub fn build_app() -> App<'static> {
    App::new("fsize")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Show the size of files or directories in different units")
        .after_help(
            "Examples:\n  fsize --file /path/to/file.ext\n  fsize -d /path/to/directory/",
        )
        .arg(
            Arg::with_name("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("File to measure")
                .takes_value(true)
                .allow_hyphen_values(true)
                .allow_invalid_utf8(true)
                .multiple_occurrences(true),
        )
        .arg(
            Arg::with_name("directory")
                .short('d')
                .long("directory")
                .value_name("DIR")
                .help("Directory to measure recursively")
                .takes_value(true)
                .allow_hyphen_values(true)
                .allow_invalid_utf8(true)
                .multiple_occurrences(true),
        )
        .arg(
            Arg::with_name("progress")
                .short('p')
                .multiple_occurrences(true)
                .help("Show a progress spinner while scanning directories"),
        )
        .arg(
            Arg::with_name("verbose")
                .short('v')
                .long("verbose")
                .multiple_occurrences(true)
                .help("Enable debug logging"),
        )
        .arg(
            Arg::with_name("PATH")
                .help("File or directory, only honoured when it is the sole argument")
                .allow_invalid_utf8(true)
                .index(1),
        )
}

pub fn print_help() {
    let mut app = build_app();
    if app.print_help().is_ok() {
        println!();
    }
}

/// `args` 包含程序名，与 `std::env::args_os()` 一致
pub fn parse<I, T>(args: I) -> Result<Invocation, FsizeError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let user_args = args.get(1..).unwrap_or_default();

    if user_args.is_empty() {
        return Err(FsizeError::NoArguments);
    }

    // -h 出现在任何位置都直接显示帮助
    if user_args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Invocation::Help);
    }
    if user_args.iter().any(|a| a == "-V" || a == "--version") {
        return Ok(Invocation::Version);
    }

    let matches = match build_app().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp => Ok(Invocation::Help),
                ErrorKind::DisplayVersion => Ok(Invocation::Version),
                _ => match missing_value_flag(user_args) {
                    Some(flag) => Err(FsizeError::MissingArgument { flag }),
                    None => Err(FsizeError::Usage(e)),
                },
            }
        }
    };

    Ok(Invocation::Run(RunOptions {
        target: resolve_target(&matches, user_args.len()),
        progress: matches.is_present("progress"),
        verbose: matches.is_present("verbose"),
    }))
}

/// -f 与 -d 同时出现时，以命令行上最后一次出现的为准
fn resolve_target(matches: &ArgMatches, arg_count: usize) -> TargetSpec {
    let explicit = [
        ("file", ExplicitKind::File),
        ("directory", ExplicitKind::Directory),
    ]
    .iter()
    .filter_map(|(name, kind)| {
        last_occurrence(matches, name).map(|(idx, path)| (idx, path, *kind))
    })
    .max_by_key(|(idx, _, _)| *idx);

    if let Some((_, path, kind)) = explicit {
        return TargetSpec::new(path, kind);
    }

    match matches.value_of_os("PATH") {
        Some(path) if arg_count == 1 => TargetSpec::new(path, ExplicitKind::None),
        _ => TargetSpec::new(PathBuf::new(), ExplicitKind::None),
    }
}

fn last_occurrence(matches: &ArgMatches, name: &str) -> Option<(usize, PathBuf)> {
    let index = matches.indices_of(name)?.last()?;
    let value = matches.values_of_os(name)?.last()?;
    Some((index, PathBuf::from(value)))
}

/// 找出后面没有值的 -f/-d，紧跟其后的参数无论是否以 '-' 开头都算作值
fn missing_value_flag(args: &[OsString]) -> Option<String> {
    let mut i = 0;
    while i < args.len() {
        let is_kind_flag = matches!(
            args[i].to_str(),
            Some("-f" | "--file" | "-d" | "--directory")
        );
        if is_kind_flag {
            if i + 1 >= args.len() {
                return args[i].to_str().map(str::to_string);
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    None
}
