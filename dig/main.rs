// Simple dig style command line.
// dig [@server] [+strict] {domain} {type}
mod util;

use dnswire::clients::{random_id, Exchanger, UdpClient};
use dnswire::types::*;
use log::info;
use std::env;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::process;
use std::str::FromStr;

// A simple type alias so as to DRY.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const DEFAULT_SERVER: &str = "8.8.8.8:53";

#[derive(Debug, PartialEq)]
struct Args {
    servers: Vec<String>,

    /// Fail on responses with a non-zero RCODE, instead of printing them.
    strict: bool,

    /// Query this types
    r#type: Type,

    /// Across all these domains
    domains: Vec<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut result = Args {
        servers: Vec::new(),
        strict: false,

        r#type: Type::A,
        domains: Vec::new(),
    };

    let mut type_or_domain = Vec::<String>::new();

    for arg in args {
        match arg.as_str() {
            "+strict" => result.strict = true,

            _ => {
                if arg.starts_with('+') {
                    return Err(format!("Unknown flag: {}", arg).into());
                }

                if let Some(server) = arg.strip_prefix('@') {
                    result.servers.push(with_default_port(server))
                } else {
                    type_or_domain.push(arg)
                }
            }
        }
    }

    let mut found_type = false;

    // To be useful, we allow users to say `dig A example.com` or `dig example.com A`
    for arg in type_or_domain {
        if !found_type {
            // Use the first type we found and assume the rest are domains.
            if let Ok(r#type) = Type::from_str(&arg.to_uppercase()) {
                result.r#type = r#type;
                found_type = true;
                continue;
            }
        }

        result.domains.push(arg)
    }

    if result.domains.is_empty() {
        return Err("no domain given".into());
    }

    if result.servers.is_empty() {
        result.servers.push(DEFAULT_SERVER.to_string());
    }

    Ok(result)
}

// Bare IP addresses get the standard DNS port.
fn with_default_port(server: &str) -> String {
    match server.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, 53).to_string(),
        Err(_) => server.to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: dig [@server] [+strict] {{domain}} {{type}}");
            process::exit(1);
        }
    };

    let mut servers = Vec::<SocketAddr>::new();
    for server in &args.servers {
        servers.extend(server.to_socket_addrs()?);
    }

    let mut client = UdpClient::new(servers.as_slice())?;
    client.parse_options.allow_error_rcode = !args.strict;

    for domain in &args.domains {
        let query = Message::query(random_id(), domain, args.r#type, Class::Internet);

        println!("query:");
        print!("{}", util::hexdump(&query.to_vec()?));
        println!();
        println!("{}", query);

        info!("querying {:?} for {} {}", client.servers(), domain, args.r#type);
        let resp = client.exchange(&query)?;

        println!("response:");
        println!("{}", resp);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(s: &str) -> Result<Args> {
        parse_args(s.split_whitespace().map(String::from))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            args("example.com").unwrap(),
            Args {
                servers: vec![DEFAULT_SERVER.to_string()],
                strict: false,
                r#type: Type::A,
                domains: vec!["example.com".to_string()],
            }
        );

        assert_eq!(
            args("@1.1.1.1 +strict aaaa example.com example.org").unwrap(),
            Args {
                servers: vec!["1.1.1.1:53".to_string()],
                strict: true,
                r#type: Type::AAAA,
                domains: vec!["example.com".to_string(), "example.org".to_string()],
            }
        );

        // Type after the domain, and a server with a port.
        let a = args("example.com MX @[::1]:5353").unwrap();
        assert_eq!(a.r#type, Type::MX);
        assert_eq!(a.servers, vec!["[::1]:5353".to_string()]);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args("").is_err());
        assert!(args("A").is_err());
        assert!(args("+tcp example.com").is_err());
    }
}
