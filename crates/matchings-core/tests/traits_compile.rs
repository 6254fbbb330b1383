use matchings_core::{LogScaleFactor, ResampledState, RngHandle};
use rand::Rng;

#[derive(Debug, Default)]
struct Coin {
    connections: Vec<u8>,
}

impl ResampledState for Coin {
    type Connection = u8;

    fn connections(&self) -> &[u8] {
        &self.connections
    }

    fn connections_mut(&mut self) -> &mut [u8] {
        &mut self.connections
    }

    fn sample_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for slot in self.connections.iter_mut() {
            *slot = rng.gen_range(0..2);
        }
    }
}

struct HeadsBonus(f64);

impl LogScaleFactor<Coin> for HeadsBonus {
    fn log_density(&self, state: &Coin) -> f64 {
        self.0 * state.connections().iter().filter(|&&c| c == 1).count() as f64
    }
}

#[test]
fn closures_and_structs_are_factors() {
    let coin = Coin {
        connections: vec![1, 0, 1],
    };
    let factors: Vec<Box<dyn LogScaleFactor<Coin>>> = vec![
        Box::new(HeadsBonus(0.5)),
        Box::new(|state: &Coin| -(state.len() as f64)),
    ];
    let total: f64 = factors.iter().map(|f| f.log_density(&coin)).sum();
    assert!((total - (1.0 - 3.0)).abs() < 1e-12);
}

#[test]
fn resampling_keeps_length_and_buffer() {
    let mut coin = Coin {
        connections: vec![0; 8],
    };
    let before = coin.connections().as_ptr();
    let mut rng = RngHandle::from_seed(5);
    coin.sample_uniform(&mut rng);
    assert_eq!(coin.len(), 8);
    assert!(!coin.is_empty());
    assert_eq!(coin.connections().as_ptr(), before);
}
