// Servalrs CLI
// Drives a Razer Serval as keyboard and mouse through a uinput device

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use log::{debug, info};

use servalrs_core::config::Config;
use servalrs_core::event::EventLoop;
use servalrs_core::input::EvdevSource;
use servalrs_core::output::VirtualDevice;

/// Game controller to keyboard/mouse translator
#[derive(Parser, Debug)]
#[command(name = "servalrs")]
#[command(version)]
#[command(about = "Use a Razer Serval as keyboard and mouse", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Controller to read, by exact name or /dev/input path
    #[arg(short, long, value_name = "DEVICE")]
    device: Option<String>,

    /// Grab the controller so other programs stop seeing it
    #[arg(short, long)]
    grab: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate config, print the output capabilities and exit
    #[arg(long)]
    check_config: bool,

    /// List available input devices
    #[arg(long)]
    list_devices: bool,
}

/// Main application state
struct Application {
    config: Config,
    /// Flag to signal event loop to stop
    running: Arc<AtomicBool>,
}

impl Application {
    /// Load config and apply command line overrides
    fn new(args: &Args) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match &args.config {
            Some(path) => Config::from_toml_path(path)?,
            None => Config::load_default()?,
        };

        if let Some(device) = &args.device {
            config.device.name = device.clone();
        }
        if args.grab {
            config.device.grab = true;
        }

        Ok(Self {
            config,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// List available input devices
    fn list_devices() -> Result<(), Box<dyn std::error::Error>> {
        let devices = EvdevSource::list_devices();
        println!("Found {} input device(s):", devices.len());
        for device in &devices {
            match &device.path {
                Some(path) => println!("  {}: {} ({})", device.index, device.name, path),
                None => println!("  {}: {}", device.index, device.name),
            }
        }
        Ok(())
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dispatcher = self.config.dispatcher()?;
        println!("Configuration is valid");
        println!("  device: {}", self.config.device.name);
        println!("  virtual device: {}", self.config.device.virtual_name);
        println!("  processors: {}", dispatcher.len());
        println!("  capabilities: {}", dispatcher.capabilities());
        Ok(())
    }

    fn install_signal_handler(&self) -> Result<(), Box<dyn std::error::Error>> {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let running = self.running.clone();

        std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!("Received signal {}, shutting down", signal);
                running.store(false, Ordering::SeqCst);
            }
        });
        Ok(())
    }

    /// Run the main event loop
    fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let device = &self.config.device;
        let dispatcher = self.config.dispatcher()?;
        let capabilities = dispatcher.capabilities();
        debug!("Output capabilities: {}", capabilities);

        let Some(mut source) =
            EvdevSource::open(&device.name, &device.virtual_name, self.running.clone())?
        else {
            info!("No device named '{}' found, nothing to do", device.name);
            return Ok(());
        };
        info!("Using {} ({})", source.name(), source.path().display());

        let mut output_device = VirtualDevice::new(&device.virtual_name, &capabilities)?;
        info!("Virtual device '{}' created", device.virtual_name);

        if device.grab {
            source.grab()?;
        }

        self.install_signal_handler()?;

        let mut event_loop = EventLoop::new(dispatcher);
        let handled = event_loop.run(&mut source, &mut output_device)?;
        info!("Stopped after {} event(s)", handled);

        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Handle list-devices flag (doesn't require config)
    if args.list_devices {
        return Application::list_devices();
    }

    let app = Application::new(&args)?;

    if args.check_config {
        return app.validate();
    }

    app.run()
}
