//! Command-line interface

use crate::{Result, Simulation, SimulatorConfig};
use clap::{Parser, Subcommand};
use lorasim_cipher::{DevAddr, FrameContext, SessionKeys};
use lorasim_common::{ErrorKind, decode_hex};
use lorasim_frame::Uplink;
use lorasim_gateway::{
    GatewayEnvelopeEncoder, GatewayId, RadioRxMetadata, RadioTxContext, ReceptionCrc,
    StdoutPublisher, SystemClock,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Parsed command line
#[derive(Parser)]
#[command(name = "lorasim")]
#[command(about = "LoRaWAN Class A ABP device and gateway uplink simulator")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Encode one uplink PHYPayload
    ///
    /// Prints the frame as lowercase hex and standard base64:
    ///   lorasim node --dev-addr 26011BDA --app-s-key <hex> --nwk-s-key <hex> --payload 01020304
    Node {
        /// Device address (8 hex digits)
        #[arg(long)]
        dev_addr: String,
        /// Application session key (32 hex digits)
        #[arg(long)]
        app_s_key: String,
        /// Network session key (32 hex digits)
        #[arg(long)]
        nwk_s_key: String,
        /// Cleartext payload (hex)
        #[arg(long)]
        payload: String,
        /// Frame counter
        #[arg(long, default_value_t = 1)]
        f_cnt: u32,
        /// Application port
        #[arg(long, default_value_t = 1)]
        f_port: u8,
        /// Send confirmed data up
        #[arg(long)]
        confirmed: bool,
        /// Clear the ADR bit
        #[arg(long)]
        no_adr: bool,
    },

    /// Wrap a PHYPayload in a gateway uplink envelope
    ///
    /// Prints the protobuf as lowercase hex and standard base64.
    Gateway {
        /// PHYPayload (hex)
        #[arg(long)]
        phy_payload: String,
        /// Frequency in Hz
        #[arg(long)]
        frequency: u32,
        /// Bandwidth in Hz
        #[arg(long)]
        bandwidth: u32,
        /// Spreading factor
        #[arg(long)]
        spreading_factor: u8,
        /// Gateway EUI (16 hex digits)
        #[arg(long)]
        gateway_id: String,
        /// RSSI in dBm
        #[arg(long, allow_negative_numbers = true)]
        rssi: i32,
        /// SNR in dB
        #[arg(long, allow_negative_numbers = true)]
        snr: f32,
        /// Opaque context (hex)
        #[arg(long)]
        context: String,
        /// CRC status: OK, FAIL or UNKNOWN
        #[arg(long, default_value = "OK")]
        crc_status: String,
    },

    /// Run the full pipeline from a configuration file
    ///
    /// The envelope is written to stdout with its topic instead of being
    /// sent to a broker.
    Simulate {
        /// Configuration file (JSON)
        #[arg(long, default_value = "conf.json")]
        config: PathBuf,
    },
}

/// Execute one command
///
/// # Errors
///
/// Any input, construction or transport error of the selected command.
pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Node {
            dev_addr,
            app_s_key,
            nwk_s_key,
            payload,
            f_cnt,
            f_port,
            confirmed,
            no_adr,
        } => {
            let dev_addr = DevAddr::from_hex(&dev_addr)?;
            let keys = SessionKeys::from_hex(&app_s_key, &nwk_s_key)?;
            let payload = decode_hex("payload", &payload)?;

            let builder = if confirmed {
                Uplink::confirmed()
            } else {
                Uplink::unconfirmed()
            };
            let frame = builder
                .port(f_port)
                .adr(!no_adr)
                .payload(payload)
                .seal(&keys, &FrameContext::uplink(dev_addr, f_cnt))?
                .to_encoded();

            println!("Hex: {}", frame.to_hex());
            println!("Base64: {}", frame.to_base64());
        }

        Commands::Gateway {
            phy_payload,
            frequency,
            bandwidth,
            spreading_factor,
            gateway_id,
            rssi,
            snr,
            context,
            crc_status,
        } => {
            let phy_payload = decode_hex("phy_payload", &phy_payload)?;
            let tx = RadioTxContext::lora(frequency, bandwidth, spreading_factor)?;
            let rx = RadioRxMetadata::new(GatewayId::from_hex(&gateway_id)?)
                .with_rssi(rssi)
                .with_snr(snr)
                .with_context_hex(&context)?
                .with_crc(crc_status.parse::<ReceptionCrc>()?);

            let envelope = GatewayEnvelopeEncoder::new(SystemClock).encode(&phy_payload, &tx, &rx);
            println!("Protobuf (hex): {}", envelope.to_hex());
            println!("Protobuf (base64): {}", envelope.to_base64());
        }

        Commands::Simulate { config } => {
            let config = SimulatorConfig::load(&config).await?;
            let mut simulation = Simulation::from_config(&config)?;
            let report = simulation.run(&StdoutPublisher, SystemClock).await?;
            println!("PHYPayload (hex): {}", report.phy_payload.to_hex());
            println!("Protobuf (hex): {}", report.envelope.to_hex());
            println!("Protobuf (base64): {}", report.envelope.to_base64());
        }
    }
    Ok(())
}

/// Process exit status for a failed command
#[must_use]
pub fn exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::MalformedInput => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
