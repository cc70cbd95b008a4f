use std::{env, fs, path::PathBuf};

use clap::{Arg, ArgAction, ArgGroup, Command};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let criteria_file = || {
        Arg::new("criteria")
            .long("criteria")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Criteria JSON file replacing the built-in set")
    };

    let mut cmd = Command::new("overview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check web content against AI Overview criteria")
        .arg(clap::arg!(-v --verbose "Enable progress output on stderr").global(true))
        .subcommand(
            Command::new("fetch")
                .about("Fetch a page and print its paragraph text")
                .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
                .arg(clap::arg!(--preview "Print only the first 1000 characters"))
                .arg(clap::arg!(--json "Print the extraction as JSON"))
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10")),
        )
        .subcommand(
            Command::new("analyze")
                .about("Analyze content against one or more criteria")
                .arg(clap::arg!(--url <URL> "Page URL to fetch"))
                .arg(
                    clap::arg!(--html <FILE> "Local HTML file, or '-' for stdin")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(clap::arg!(--text <TEXT> "Text analyzed exactly as given"))
                .arg(clap::arg!(--topic <TOPIC> "Topic or target query"))
                .group(ArgGroup::new("source").args(["url", "html", "text", "topic"]).required(true))
                .arg(
                    Arg::new("criterion")
                        .short('c')
                        .long("criterion")
                        .value_name("ID")
                        .action(ArgAction::Append)
                        .help("Criterion id; repeat for several (default: all)"),
                )
                .arg(clap::arg!(-m --model <MODEL> "Model id or label"))
                .arg(clap::arg!(--"api-key" <KEY> "Google AI API key").env("GOOGLE_API_KEY"))
                .arg(criteria_file())
                .arg(
                    clap::arg!(--"gemini-base-url" <URL> "Gemini API base URL")
                        .env("OVERVIEW_GEMINI_BASE_URL")
                        .hide(true),
                )
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout for page fetches in seconds").default_value("10"))
                .arg(clap::arg!(--json "Print results as JSON")),
        )
        .subcommand(
            Command::new("assess")
                .about("Score the AI Overview readiness checklists for a topic")
                .arg(clap::arg!(--topic <TOPIC> "Target query or content topic").required(true))
                .arg(
                    clap::arg!(--when <N> "Query checklist questions answered yes, by number (1-6)")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(
                    clap::arg!(--content <N> "Content checklist questions answered yes, by number (1-5)")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(Command::new("models").about("List selectable models"))
        .subcommand(Command::new("criteria").about("List analysis criteria").arg(criteria_file()))
        .subcommand(Command::new("guide").about("Print the AI Overview guide and checklist questions"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion script")
                .arg(Arg::new("shell").required(true).value_parser(["bash", "zsh", "fish", "powershell", "elvish"])),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "overview", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "overview", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "overview", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "overview", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
