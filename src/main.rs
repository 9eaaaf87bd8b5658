use rtlflags::cli::{self, Command};
use rtlflags::DryRunRadio;

fn main() {
    env_logger::init();

    let (args, matches) = cli::parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let result = match args.command {
        Some(Command::Config { ref action }) => {
            cli::handle_config_action(action.clone(), args.config.as_deref())
        }
        None => {
            let mut radio = DryRunRadio::new();
            cli::apply_flags(&args, &matches, &mut radio).map(|_| {
                if radio.calls().is_empty() {
                    println!("No radio settings supplied.");
                } else {
                    println!("Applied {} setting(s):", radio.calls().len());
                    for call in radio.calls() {
                        println!("  {}", call);
                    }
                }
            })
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
