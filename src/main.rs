use deckhand::commands;
use deckhand::SystemRunner;

/// Exit status for an unknown (or missing) subcommand.
const EXIT_UNKNOWN_COMMAND: i32 = 127;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let Some((name, rest)) = argv.split_first() else {
        print!("{}", commands::usage("deckhand"));
        return EXIT_UNKNOWN_COMMAND;
    };

    let Some(spec) = commands::find(name) else {
        print!("{}", commands::usage("deckhand"));
        return EXIT_UNKNOWN_COMMAND;
    };

    let command = match (spec.build)(rest) {
        Ok(command) => command,
        Err(err) => err.exit(),
    };

    let runner = SystemRunner;
    let result = command
        .check_environment()
        .and_then(|()| command.handle(&runner));

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error[{}]: {}", err.code(), err);
            1
        }
    }
}
