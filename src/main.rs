use clap::Parser;
use image::{ImageBuffer, Rgb};
use log::info;
use marchtoy::marcher::{render_frame, Frame};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(short, long, default_value_t = 2)]
    antialias: u32,

    /// Scene time in seconds.
    #[arg(short, long, default_value_t = 0.0)]
    time: f64,

    #[arg(long, default_value_t = 0.0)]
    mouse_x: f64,

    #[arg(long, default_value_t = 0.0)]
    mouse_y: f64,

    /// Randomize subpixel sample positions instead of using a fixed grid.
    #[arg(short, long, default_value_t = false)]
    jitter: bool,

    #[arg(short, long, default_value = "out.png")]
    out: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let frame = Frame {
        width: args.width,
        height: args.height,
        mouse: (args.mouse_x, args.mouse_y),
        time: args.time,
    };

    info!(
        "rendering {}x{} at t = {}",
        frame.width, frame.height, frame.time
    );
    let start = Instant::now();
    let pixels = render_frame(&frame, args.antialias, args.jitter);
    info!("render took {} s", start.elapsed().as_secs_f32());

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(args.width, args.height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let col = pixels[(x + y * args.width) as usize];
        *p = Rgb([
            (col.x.clamp(0., 1.) * 255.) as u8,
            (col.y.clamp(0., 1.) * 255.) as u8,
            (col.z.clamp(0., 1.) * 255.) as u8,
        ]);
    }
    img.save(&args.out)?;
    info!("wrote {}", args.out);
    Ok(())
}
