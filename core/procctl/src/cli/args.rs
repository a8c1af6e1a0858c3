use crate::domain::{Command, Endpoint, RunRequest};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use procutil::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

/// `run` のオプション（CLI から受け取ったまま）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunOptions {
    pub stdin: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub stdin_fd: Option<i32>,
    pub stdout_fd: Option<i32>,
    pub stderr_fd: Option<i32>,
    pub append: bool,
    pub quiet: bool,
}

/// CLI から受け取った生の設定（command は文字列のまま保持）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// JSONL ログの出力先（PROCCTL_LOG_FILE より優先）
    pub log_file: Option<String>,
    /// コマンド名（None の場合は Help）
    pub command_name: Option<String>,
    pub command_args: Vec<String>,
    pub run: RunOptions,
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("log-file")
                .short('l')
                .long("log-file")
                .value_name("path")
                .help("Append JSONL logs to this file (sets PROCCTL_LOG_FILE for this process)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn stream_args(cmd: clap::Command, name: &'static str, fd_name: &'static str, short: char) -> clap::Command {
    cmd.arg(
        clap::Arg::new(name)
            .short(short)
            .long(name)
            .value_name("path")
            .help(format!("Attach {} of the command to this file", name))
            .num_args(1)
            .conflicts_with(fd_name),
    )
    .arg(
        clap::Arg::new(fd_name)
            .long(fd_name)
            .value_name("fd")
            .help(format!("Attach {} of the command to an already open descriptor", name))
            .value_parser(value_parser!(i32))
            .num_args(1),
    )
}

fn build_run_subcommand() -> clap::Command {
    let run = clap::Command::new("run")
        .about("Run a shell command with redirected stdin/stdout/stderr and wait for it");
    let run = stream_args(run, "stdin", "stdin-fd", 'i');
    let run = stream_args(run, "stdout", "stdout-fd", 'o');
    let run = stream_args(run, "stderr", "stderr-fd", 'e');
    run.arg(
        clap::Arg::new("append")
            .short('a')
            .long("append")
            .help("Append to --stdout/--stderr files instead of truncating")
            .action(ArgAction::SetTrue),
    )
    .arg(
        clap::Arg::new("quiet")
            .short('q')
            .long("quiet")
            .help("Do not print the termination status line")
            .action(ArgAction::SetTrue),
    )
    .arg(
        clap::Arg::new("command")
            .value_name("command")
            .help("Shell command (passed to sh -c)")
            .required(true)
            .num_args(1..)
            .trailing_var_arg(true)
            .allow_hyphen_values(true),
    )
}

pub(crate) fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new("procctl")
            .about("Run shell commands with redirected descriptors and change the host name")
            .subcommand_required(false)
            .disable_help_subcommand(true)
            .subcommand(build_run_subcommand())
            .subcommand(
                clap::Command::new("hostname")
                    .about("Print the host name, or change it when a name is given")
                    .arg(clap::Arg::new("name").value_name("name").num_args(0..=1)),
            )
            .subcommand(clap::Command::new("help").about("Display this help message")),
    )
}

fn matches_to_run_options(m: &clap::ArgMatches) -> RunOptions {
    RunOptions {
        stdin: m.get_one::<String>("stdin").cloned(),
        stdout: m.get_one::<String>("stdout").cloned(),
        stderr: m.get_one::<String>("stderr").cloned(),
        stdin_fd: m.get_one::<i32>("stdin-fd").copied(),
        stdout_fd: m.get_one::<i32>("stdout-fd").copied(),
        stderr_fd: m.get_one::<i32>("stderr-fd").copied(),
        append: m.get_flag("append"),
        quiet: m.get_flag("quiet"),
    }
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help") || matches.subcommand_matches("help").is_some();
    let log_file = matches.get_one::<String>("log-file").cloned();

    let (command_name, command_args, run) = match matches.subcommand() {
        None | Some(("help", _)) => (None, Vec::new(), RunOptions::default()),
        Some(("run", m)) => (
            Some("run".to_string()),
            m.get_many::<String>("command")
                .map(|i| i.cloned().collect())
                .unwrap_or_default(),
            matches_to_run_options(m),
        ),
        Some(("hostname", m)) => (
            Some("hostname".to_string()),
            m.get_one::<String>("name").cloned().into_iter().collect(),
            RunOptions::default(),
        ),
        Some((name, _)) => (Some(name.to_string()), vec![], RunOptions::default()),
    };

    Config {
        help,
        log_file,
        command_name,
        command_args,
        run,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

/// 任意の引数列を解析する（先頭はプログラム名）
pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "procctl", &mut std::io::stdout());
}

fn endpoint(path: &Option<String>, fd: Option<i32>) -> Endpoint {
    match (path, fd) {
        (Some(p), _) => Endpoint::Path(PathBuf::from(p)),
        (None, Some(fd)) => Endpoint::Fd(fd),
        (None, None) => Endpoint::Inherit,
    }
}

/// Config を Command に変換する
pub fn config_to_command(config: &Config) -> Command {
    if config.help {
        return Command::Help;
    }
    match config.command_name.as_deref() {
        None => Command::Help,
        Some("run") => {
            let opts = &config.run;
            Command::Run(RunRequest {
                command: config.command_args.join(" "),
                stdin: endpoint(&opts.stdin, opts.stdin_fd),
                stdout: endpoint(&opts.stdout, opts.stdout_fd),
                stderr: endpoint(&opts.stderr, opts.stderr_fd),
                append: opts.append,
                quiet: opts.quiet,
            })
        }
        Some("hostname") => Command::Hostname {
            name: config.command_args.first().cloned(),
        },
        Some(name) => Command::Unknown(name.to_string()),
    }
}
