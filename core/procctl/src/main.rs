#[cfg(unix)]
mod adapter;
#[cfg(unix)]
mod cli;
#[cfg(unix)]
mod domain;
#[cfg(unix)]
mod ports;
#[cfg(unix)]
mod usecase;
#[cfg(unix)]
mod wiring;

use procutil::error::Error;
use std::process;
#[cfg(unix)]
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
#[cfg(unix)]
use domain::Command;
#[cfg(unix)]
use ports::inbound::UseCaseRunner;
#[cfg(unix)]
use procutil::ports::outbound::{LogLevel, LogRecord};
#[cfg(unix)]
use usecase::{HostnameUseCase, RunUseCase};
#[cfg(unix)]
use wiring::{wire_procctl, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
#[cfg(unix)]
struct Runner {
    app: App,
}

#[cfg(unix)]
impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let command = config_to_command(&config);
        let result = match command {
            Command::Help => {
                print_help();
                Ok(0)
            }
            Command::Run(req) => {
                let result = RunUseCase::from_app(&self.app).run(&req)?;
                if !req.quiet {
                    eprintln!("procctl: {}", result);
                }
                Ok(result.status().shell_code())
            }
            Command::Hostname { name } => {
                let current = HostnameUseCase::from_app(&self.app).run(name.as_deref())?;
                println!("{}", current);
                Ok(0)
            }
            Command::Unknown(name) => Err(Error::invalid_argument(format!(
                "Command '{}' is not implemented.",
                name
            ))),
        };
        // 失敗の詳細は usecase 側が記録済み。ここではプロセスの終了コードだけ残す
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, "exiting with error")
                    .layer("cli")
                    .kind("exit")
                    .field("error", e.to_string())
                    .field("exit_code", e.exit_code()),
            );
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("procctl: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: procctl [-h] [-l|--log-file path] <command> [args...]");
}

#[cfg(unix)]
fn print_help() {
    println!("Usage: procctl [-h] [-l|--log-file path] <command> [args...]");
    println!("  -h, --help            Display this help message.");
    println!("  -l, --log-file        Append JSONL logs to this file (sets PROCCTL_LOG_FILE for this process).");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!();
    println!("Environment:");
    println!("  PROCCTL_LOG_FILE   JSONL log file. No log is written when unset.");
    println!("  PROCCTL_SHELL      Shell used by run (invoked as <shell> -c <command>). Default: /bin/sh.");
    println!();
    println!("Commands:");
    println!("  run [options] <command>   Run a shell command and wait for it. Exit code mirrors the command");
    println!("                            (128 + signal when it was killed).");
    println!("    -i, --stdin <path>      Read stdin from a file.   --stdin-fd <fd>   Use an open descriptor.");
    println!("    -o, --stdout <path>     Write stdout to a file.   --stdout-fd <fd>  Use an open descriptor.");
    println!("    -e, --stderr <path>     Write stderr to a file.   --stderr-fd <fd>  Use an open descriptor.");
    println!("    -a, --append            Append to output files instead of truncating.");
    println!("    -q, --quiet             Do not print the termination status line.");
    println!("  hostname [<name>]         Print the host name, or change it (needs privilege).");
}

pub fn run() -> Result<i32, Error> {
    #[cfg(unix)]
    {
        let outcome = parse_args()?;
        let config = match outcome {
            ParseOutcome::Config(c) => c,
            ParseOutcome::GenerateCompletion(shell) => {
                print_completion(shell);
                return Ok(0);
            }
        };
        // -l/--log-file 指定時は PROCCTL_LOG_FILE を設定し、配線がその値を使うようにする
        if let Some(ref path) = config.log_file {
            std::env::set_var(adapter::LOG_FILE_ENV, path);
        }
        let runner = Runner {
            app: wire_procctl()?,
        };
        runner.run(config)
    }
    #[cfg(not(unix))]
    {
        Err(Error::system("procctl is only supported on Unix"))
    }
}
