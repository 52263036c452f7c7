use roadphys_surface::FlatSurface;
use roadphys_vehicle::{Car, InputSnapshot, Preset};

fn main() {
    let mut car = Car::with_preset(Preset::Balanced);
    car.set_ready(true);
    let ground = FlatSurface { height: 0.0 };

    let throttle = InputSnapshot { accelerate: true, ..InputSnapshot::NEUTRAL };
    for tick in 0..240 {
        car.step(throttle, 1.0 / 60.0, &ground);
        if (tick + 1) % 60 == 0 {
            let t = car.telemetry();
            println!(
                "tick {:3}  speed {:5.2} m/s  digest {:02x?}",
                tick + 1,
                t.speed,
                &car.state_digest()[..4]
            );
        }
    }
}
