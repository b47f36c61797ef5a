// ---------------------------------------------------------------------
// name: Book
// type: Command line application.
// desc: Books a taxi between two addresses.  Geocodes both ends,
//       looks up the driving route and submits the order to the
//       dispatch api.
// ---------------------------------------------------------------------

use anyhow::Context;
use booking_assistant::order::{Passenger, Requirements};
use booking_assistant::route::PtsEncoding;
use booking_assistant::{geolocate::Mapbox, pickup_time, Config, Request};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "book", about = "Book a taxi between two addresses")]
struct Args {
    /// Address to be picked up from
    #[arg(long)]
    pickup: String,

    /// Address to be dropped off at
    #[arg(long)]
    destination: String,

    /// Passenger name
    #[arg(long)]
    name: String,

    /// Passenger phone number, +64 numbers are converted to local format
    #[arg(long)]
    phone: String,

    #[arg(long)]
    email: Option<String>,

    /// Pickup time, "now", epoch seconds, "YYYY-MM-DD HH:MM" or RFC 3339
    #[arg(long, default_value = "now")]
    time: String,

    /// Instructions for the driver
    #[arg(long, default_value = "")]
    instructions: String,

    #[arg(long, default_value_t = 1)]
    seats: u32,

    #[arg(long, default_value_t = 0)]
    wheelchairs: u32,

    #[arg(long, default_value_t = 0)]
    luggage: u32,

    /// How to send the route geometry: flat, pairs, objects, polyline or none.
    /// Overrides PTS_ENCODING.
    #[arg(long)]
    pts_encoding: Option<PtsEncoding>,

    /// Send every point along the route as a pass-through stop
    #[arg(long)]
    waypoints: bool,

    /// Book a direct trip if no driving route can be found
    #[arg(long)]
    straight_line_fallback: bool,

    /// Print the order instead of submitting it
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn request(&self, config: &Config) -> anyhow::Result<Request> {
        let pickup_time = pickup_time::pickup_epoch(&self.time)
            .with_context(|| format!("Invalid pickup time {}", self.time))?;

        Ok(Request {
            pickup: self.pickup.clone(),
            destination: self.destination.clone(),
            passenger: Passenger::new(&self.name, &self.phone, self.email.as_deref()),
            requirements: Requirements {
                seats: self.seats,
                wheelchairs: self.wheelchairs,
                luggage: self.luggage,
            },
            pickup_time,
            instructions: self.instructions.clone(),
            waypoints: self.waypoints,
            pts_encoding: self.pts_encoding.unwrap_or(config.pts_encoding),
            straight_line_fallback: self.straight_line_fallback,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let request = args.request(&config)?;

    let client = booking_assistant::client(config.timeout)?;
    let mapbox = Mapbox::new(&client, &config);
    let order = booking_assistant::prepare(&mapbox, &request)
        .context("Unable to build the booking")?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    info!(
        "submitting booking with {} nodes, pts as {}",
        order.route.nodes.len(),
        request.pts_encoding
    );
    let receipt = booking_assistant::book(&client, &config, &order).context("Booking failed")?;
    println!("{}", receipt.order_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_lookup(|name| match name {
            "DISPATCH_API_KEY" => Some(String::from("key")),
            "DISPATCH_TOKEN_URL" => Some(String::from("https://dispatch.example.com/token")),
            "DISPATCH_ORDER_URL" => Some(String::from("https://dispatch.example.com/orders")),
            "MAPBOX_ACCESS_TOKEN" => Some(String::from("pk.test")),
            "PTS_ENCODING" => Some(String::from("objects")),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn minimal_arguments() {
        let args = Args::try_parse_from([
            "book",
            "--pickup",
            "Wellington Railway Station",
            "--destination",
            "Petone",
            "--name",
            "Jo",
            "--phone",
            "+64221234567",
        ])
        .unwrap();
        let request = args.request(&config()).unwrap();
        assert_eq!(request.passenger.phone, "0221234567");
        assert_eq!(request.pickup_time, 0);
        assert_eq!(request.requirements, Requirements::default());
        assert_eq!(request.pts_encoding, PtsEncoding::Objects);
        assert!(!request.waypoints);
        assert!(!args.dry_run);
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "book",
            "--pickup",
            "a",
            "--destination",
            "b",
            "--name",
            "Jo",
            "--phone",
            "021",
            "--time",
            "1700000000",
            "--seats",
            "3",
            "--pts-encoding",
            "polyline",
            "--waypoints",
            "--dry-run",
        ])
        .unwrap();
        let request = args.request(&config()).unwrap();
        assert_eq!(request.pickup_time, 1_700_000_000);
        assert_eq!(request.requirements.seats, 3);
        assert_eq!(request.pts_encoding, PtsEncoding::Polyline);
        assert!(request.waypoints);
        assert!(args.dry_run);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from([
            "book", "--pickup", "a", "--destination", "b", "--name", "Jo", "--phone", "021",
            "--pts-encoding", "nested",
        ])
        .is_err());

        let args = Args::try_parse_from([
            "book", "--pickup", "a", "--destination", "b", "--name", "Jo", "--phone", "021",
            "--time", "whenever",
        ])
        .unwrap();
        assert!(args.request(&config()).is_err());
    }
}
