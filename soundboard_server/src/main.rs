use std::path::PathBuf;

use clap::{App, Arg};

mod server;

#[tokio::main]
pub async fn main() {
    pretty_env_logger::init();

    let app = App::new("Soundboard")
        .version("0.3")
        .author("Henri Bourcereau <henri@bourcereau.fr>")
        .about("Serves the soundboard web application")
        .arg(Arg::with_name("directory")
             .short("d")
             .long("directory")
             .value_name("ROOT")
             .help("Directory path of the static files")
             .takes_value(true))
        .arg(Arg::with_name("address")
             .short("a")
             .long("address")
             .value_name("IP")
             .help("IP address the server listen to")
             .takes_value(true))
        .arg(Arg::with_name("port")
             .short("p")
             .long("port")
             .value_name("PORT")
             .help("Port the server listen to")
             .takes_value(true))
        ;
    let matches = app.get_matches();

    let public_dir = match matches.value_of("directory") {
        Some(dir) => PathBuf::from(dir),
        None => match std::env::current_dir() {
            Ok(current) => current.join("public"),
            Err(e) => {
                log::error!("Can't find current path: {}", e);
                return;
            }
        },
    };
    if !public_dir.is_dir() {
        log::warn!("{} is not a directory, every request will fail", public_dir.display());
    }

    let str_port = matches.value_of("port").unwrap_or("8002");
    let str_ip = matches.value_of("address").unwrap_or("127.0.0.1");

    let str_socket = format!("{}:{}", str_ip, str_port);
    match str_socket.parse() {
        Ok(socket) => server::serve(public_dir, socket).await,
        Err(_) => log::error!("Could not parse ip / port {}", str_socket),
    }
}
