use clap::Parser;
use image::{ImageBuffer, Rgb};
use log::info;
use marchtoy::marcher::{render_frame, Frame};
use std::path::PathBuf;
use std::time::Instant;

/// Render a numbered PNG sequence of the animated scene, advancing the time
/// uniform by 1/fps per frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(short, long, default_value_t = 2)]
    antialias: u32,

    #[arg(short, long, default_value_t = 120)]
    frames: u32,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    #[arg(short, long, default_value_t = false)]
    jitter: bool,

    #[arg(short, long, default_value = "frames")]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.outdir)?;
    let start = Instant::now();

    for i in 0..args.frames {
        let frame = Frame {
            width: args.width,
            height: args.height,
            mouse: (0., 0.),
            time: i as f64 / args.fps,
        };
        let pixels = render_frame(&frame, args.antialias, args.jitter);

        let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(args.width, args.height);
        for (x, y, p) in img.enumerate_pixels_mut() {
            let col = pixels[(x + y * args.width) as usize];
            *p = Rgb([
                (col.x.clamp(0., 1.) * 255.) as u8,
                (col.y.clamp(0., 1.) * 255.) as u8,
                (col.z.clamp(0., 1.) * 255.) as u8,
            ]);
        }
        let path = args.outdir.join(format!("frame_{:04}.png", i));
        img.save(&path)?;
        info!("frame {} at t = {:.3} -> {}", i, frame.time, path.display());
    }

    info!(
        "{} frames took {} s",
        args.frames,
        start.elapsed().as_secs_f32()
    );
    Ok(())
}
