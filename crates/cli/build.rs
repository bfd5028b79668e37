use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let path_arg = |arg: clap::Arg| arg.value_parser(clap::value_parser!(std::path::PathBuf));

    let mut cmd = clap::Command::new("shiplabel")
        .version(env!("CARGO_PKG_VERSION"))
        .author("shiplabel contributors")
        .about("Compose and print shipping labels")
        .arg(clap::arg!(--from_text <TEXT> "Free-text sender address to auto-fill from (\"-\" for stdin)"))
        .arg(clap::arg!(--to_text <TEXT> "Free-text receiver address to auto-fill from (\"-\" for stdin)"))
        .arg(clap::arg!(--from <FIELD_VALUE> "Set a sender field, applied after auto-fill").action(clap::ArgAction::Append))
        .arg(clap::arg!(--to <FIELD_VALUE> "Set a receiver field, applied after auto-fill").action(clap::ArgAction::Append))
        .arg(clap::arg!(-w --weight <LBS> "Package weight in pounds"))
        .arg(clap::arg!(-s --size <SIZE> "Label size").value_parser(["4x6", "4x4", "custom"]))
        .arg(clap::arg!(--width <INCHES> "Custom label width in inches"))
        .arg(clap::arg!(--height <INCHES> "Custom label height in inches"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, html, json)")
                .default_value("text")
                .value_parser(["text", "html", "json"]),
        )
        .arg(clap::arg!(--print "Open the print dialog when the HTML label is loaded"))
        .arg(path_arg(clap::arg!(-o --output <FILE> "Output file (default: stdout)")))
        .arg(path_arg(clap::arg!(--replay <FILE> "Use a saved generateContent response")))
        .arg(path_arg(clap::arg!(--config <FILE> "Settings file")))
        .arg(clap::arg!(--api_key <KEY> "Gemini API key"))
        .arg(clap::arg!(--model <MODEL> "Gemini model name"))
        .arg(clap::arg!(--endpoint <URL> "Gemini API base URL"))
        .arg(clap::arg!(--country <COUNTRY> "Fallback country for empty or unclear addresses"))
        .arg(clap::arg!(--timeout <SECS> "Request timeout in seconds"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "shiplabel", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "shiplabel", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "shiplabel", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "shiplabel", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
