pub mod commands;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("genset_telemetry")
        .version(crate::VERSION)
        .about("Modbus RTU telemetry collector for diesel generator controllers")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Load settings from a TOML file"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Serial port device"),
        )
        .arg(
            Arg::new("baud")
                .short('b')
                .long("baud")
                .value_name("BAUD")
                .help("Baud rate"),
        )
        .arg(
            Arg::new("slave")
                .short('s')
                .long("slave")
                .value_name("ADDRESS")
                .help("Modbus slave address"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECONDS")
                .help("Poll interval in seconds"),
        )
        .arg(
            Arg::new("endpoint")
                .short('e')
                .long("endpoint")
                .value_name("URL")
                .help("Collection endpoint URL"),
        )
        .arg(
            Arg::new("console")
                .long("console")
                .action(ArgAction::SetTrue)
                .help("Also print each payload to stdout"),
        )
        .subcommand(
            Command::new("getdata")
                .about("Run a single acquisition cycle and print the JSON payload"),
        )
        .subcommand(Command::new("listports").about("List available serial ports"))
        .subcommand(
            Command::new("writeconfig")
                .about("Write the active configuration to a TOML file")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Target path (default: genset_telemetry.toml)"),
                ),
        )
}
