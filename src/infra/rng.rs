use crate::engine::RandomSource;

/// Ничего не перемешивает: колода остаётся в исходном порядке.
/// Нужен для реплеев по заранее разложенной колоде и для тестов.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedOrderRng;

impl RandomSource for FixedOrderRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

//
// Нативная сборка: настоящий rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;

        slice.shuffle(&mut rand::thread_rng());
    }
}

/// Детерминированный RNG: одинаковый seed даёт одинаковые раздачи
/// и одинаковые перетасовки сброса.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

//
// wasm (контракт): rand не подключаем, колода приходит уже перетасованной
// или раскладывается через `start_round_with_deck`.
//
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(target_arch = "wasm32")]
impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}
