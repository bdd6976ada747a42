use std::time::Duration;

use core_types::{Point, Size};
use dom::FrameTime;
use elements::factory::{button, canvas, div, h1, li, p, ul};
use elements::{ElementArg, Paint, ShapeKind, ShapeSpec, Ui, UiConfig, UiError};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const FRAMES: u32 = 5;

/// Drives the context the way a windowing loop would: fixed frame budget,
/// one redraw per tick.
struct Host {
    ui: Ui,
    frame: u32,
    target_frame_time: Duration,
}

impl Host {
    fn new(ui: Ui) -> Self {
        Self {
            ui,
            frame: 0,
            target_frame_time: Duration::from_millis(16),
        }
    }

    fn frame_time(&self) -> FrameTime {
        self.target_frame_time.as_secs_f64() * 1000.0 * f64::from(self.frame)
    }

    fn redraw(&mut self) {
        self.frame += 1;
        let now = self.frame_time();
        let ran = self.ui.run_frame(now);
        log::debug!("frame #{} at {now}ms ran {ran} callback(s)", self.frame);
    }
}

fn build_page(ui: &mut Ui) -> Result<(), Box<dyn std::error::Error>> {
    let body = ui.body();
    let page = div(
        ui,
        [
            ElementArg::parent(body),
            ElementArg::attributes([("class", "page")]),
        ],
    )?;
    h1(ui, [ElementArg::parent(page), "domforge".into()])?;
    p(ui, [ElementArg::parent(page), "Elements built from tagged arguments.".into()])?;

    let list = ul(ui, [ElementArg::parent(page)])?;
    for item in ["registry", "factories", "canvas"] {
        li(ui, [ElementArg::parent(list), item.into()])?;
    }

    let status = p(ui, [ElementArg::parent(page), "not clicked".into()])?;
    let ok = button(
        ui,
        [
            ElementArg::parent(page),
            ElementArg::event("click", |event| {
                log::info!("click on {} reached {}", event.target(), event.current_target());
            }),
            "OK".into(),
        ],
    )?;

    let surface = canvas(ui, [ElementArg::parent(page)])?;
    let mut drawing = ui.canvas(surface).ok_or(UiError::UnknownElement(surface))?;
    drawing.size(200, 100).set_quality(2.0);
    drawing.animate(|canvas, now| {
        let x = ((now / 16.0) as f32 * 8.0) % 200.0;
        canvas
            .clear_canvas()
            .rect(Point::new(x, 10.0), Size::new(20.0, 20.0), &Paint::new().fill("tomato"))
            .shape(
                &ShapeSpec::Regular {
                    kind: ShapeKind::Pentagon,
                    size: 15.0,
                    center: Point::new(100.0, 60.0),
                },
                &Paint::new().stroke("navy").line_width(2.0),
            );
    });

    if ui.dispatch(ok, "click").is_some() {
        let mut status = ui.element(status).ok_or(UiError::UnknownElement(status))?;
        status.set_text("clicked").style([("font-weight", Some("bold"))]);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let mut host = Host::new(Ui::with_config(UiConfig::default()));
    if let Err(err) = build_page(&mut host.ui) {
        log::error!("failed to build page: {err}");
        std::process::exit(1);
    }
    for _ in 0..FRAMES {
        host.redraw();
    }

    for line in host.ui.document().outline(usize::MAX) {
        println!("{line}");
    }
    host.ui.teardown();
}
