//! WebSocket broadcast hub server.
//!
//! Receives messages from clients and broadcasts them to every connected client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --queue-capacity 64
//! ```

use clap::Parser;
use hiroba_server::{
    config::{DEFAULT_QUEUE_CAPACITY, DEFAULT_SOCKET_BUFFER_SIZE, HubConfig},
    domain::DeliveryPolicy,
    room::spawn_room,
    ui::Server,
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket broadcast hub with a single shared room", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// WebSocket read/write buffer size per connection, in bytes
    #[arg(long, default_value_t = DEFAULT_SOCKET_BUFFER_SIZE)]
    socket_buffer_size: usize,

    /// Messages buffered per client before it is evicted as a slow consumer
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Do not echo a message back to the client that sent it
    #[arg(long)]
    exclude_sender: bool,
}

impl Args {
    fn delivery_policy(&self) -> DeliveryPolicy {
        if self.exclude_sender {
            DeliveryPolicy::ExcludeSender
        } else {
            DeliveryPolicy::EchoToSender
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = match HubConfig::new(
        args.socket_buffer_size,
        args.queue_capacity,
        args.delivery_policy(),
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    tracing::debug!("{:?}", config);

    // The room lives for the whole process
    let room = spawn_room(config.delivery_policy());

    let server = Server::new(room, config);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
