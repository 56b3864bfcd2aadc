//! `exprc`: recognize arithmetic, relational, and logical expressions.

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "check" => {
            let mut trace = false;
            let mut files = Vec::new();
            for arg in &args[2..] {
                if arg == "--trace" {
                    trace = true;
                } else {
                    files.push(arg.clone());
                }
            }
            std::process::exit(exprc::commands::check(&files, trace));
        }
        "lex" => {
            std::process::exit(exprc::commands::lex(&args[2..]));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("exprc: unknown command '{other}'");
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: exprc <command> [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check [--trace] [files...]   Recognize each input and report accept/reject");
    eprintln!("  lex [files...]               Dump the token stream of each input");
    eprintln!();
    eprintln!("Reads stdin when no files are given; '-' names stdin explicitly.");
    eprintln!("Set EXPRC_LOG (e.g. EXPRC_LOG=trace) for internal logging.");
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("EXPRC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
