use gb_mechanics::{DiceSource, RngDice, RollSpec, roll_dice};

pub fn run(spec: &str, seed: Option<u64>, times: u32) -> Result<(), String> {
    let spec = match spec.trim().parse::<u32>() {
        Ok(sides) => RollSpec::Sides(sides),
        Err(_) => RollSpec::from(spec),
    };
    let notation = spec.notation().map_err(|e| e.to_string())?;

    let mut dice: Box<dyn DiceSource> = match seed {
        Some(seed) => Box::new(RngDice::seeded(seed)),
        None => Box::new(RngDice::from_os_rng()),
    };
    for _ in 0..times {
        println!("{notation}: {}", roll_dice(&spec, dice.as_mut()));
    }
    Ok(())
}
