use crate::common::galois::{self, Polynomial, EXP_TABLE};

// Reed-Solomon error correction
//------------------------------------------------------------------------------

/// Generator polynomial for `ec_len` EC codewords: the product of
/// (x - α^i) for i in 0..ec_len, built up from the unit polynomial.
/// `ec_len + 1` coefficients, leading coefficient 1.
pub fn generator(ec_len: usize) -> Polynomial {
    debug_assert!((7..=30).contains(&ec_len), "Unsupported EC codeword count: {ec_len}");

    let mut gen = Polynomial::new(vec![1]);
    for i in 0..ec_len {
        // In GF(256) subtraction is XOR, so x - α^i is [1, α^i]
        gen = gen.mul(&Polynomial::new(vec![1, EXP_TABLE[i]]));
    }
    gen
}

/// EC codewords for one block: the remainder of the zero-padded block
/// divided by the generator, via synthetic division. Positions with a zero
/// lead coefficient contribute nothing and are skipped.
pub fn ecc(block: &[u8], gen: &Polynomial) -> Vec<u8> {
    let len = block.len();
    let ec_len = gen.len() - 1;

    let mut rem = block.to_vec();
    rem.resize(len + ec_len, 0);

    for i in 0..len {
        let lead_coeff = rem[i];
        if lead_coeff == 0 {
            continue;
        }
        for j in 1..gen.len() {
            rem[i + j] ^= galois::mul(gen[j], lead_coeff);
        }
    }

    rem.split_off(len)
}
