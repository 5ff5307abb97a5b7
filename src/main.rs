use chipvm::cli;
use log::error;

fn main() {
    let cli = cli::init();
    let result = match cli.command {
        cli::Commands::Run(args) => cli::run(&args.path, args.ips, args.config()),
        cli::Commands::Disassemble { path, output_file } => cli::disassemble(&path, output_file),
    };
    result.unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });
}
