mod ec;
mod qr;

pub use qr::{Module, QR};

use std::ops::Deref;

use log::{debug, info};

use crate::common::{
    bitstream::BitStream,
    codec::{encode, encode_with_version},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};
use ec::{ecc, generator};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!("{{ Version: {v}, Ec level: {:?} }}", self.ec_level),
            None => format!("{{ Version: None, Ec level: {:?} }}", self.ec_level),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        debug!("Generating QR {}...", self.metadata());
        let (encoded, ver) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level)?.0, v),
            None => {
                let (encoded, ver, _) = encode(self.data, self.ec_level)?;
                (encoded, ver)
            }
        };

        debug!("Computing error correction & interleaving...");
        let (data_blocks, ecc_blocks) = Self::compute_ecc(encoded.data(), ver, self.ec_level);

        let payload_len = (ver.total_codewords(self.ec_level) << 3) + ver.remainder_bits();
        let mut payload = BitStream::new(payload_len);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));
        for _ in 0..ver.remainder_bits() {
            payload.push(false);
        }

        debug!("Drawing function patterns & encoding region...");
        let mut qr = QR::new(ver, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };

        let w = ver.width();
        info!("Generated version {ver} ({w}x{w}) symbol with mask {}", *mask);

        Ok(qr)
    }

    // ECC: Error Correction Codeword generator. One generator polynomial
    // serves every block of the symbol
    fn compute_ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
        let data_blocks = Self::blockify(data, version, ec_level);

        let gen = generator(version.ecc_per_block(ec_level));
        let ecc_blocks = data_blocks.iter().map(|b| ecc(b, &gen)).collect::<Vec<_>>();

        (data_blocks, ecc_blocks)
    }

    pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
        let (block1_size, block1_count, block2_size, block2_count) =
            version.data_codewords_per_block(ec_level);

        let total_blocks = block1_count + block2_count;
        let total_block1_size = block1_size * block1_count;
        let total_size = total_block1_size + block2_size * block2_count;

        debug_assert!(
            total_size == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            total_size
        );

        let mut data_blocks = Vec::with_capacity(total_blocks);
        data_blocks.extend(data[..total_block1_size].chunks(block1_size));
        if block2_size > 0 {
            data_blocks.extend(data[total_block1_size..].chunks(block2_size));
        }
        data_blocks
    }

    pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
        // Misdecode protection codewords, per the standard's EC tables
        let p = match (*version, ec_level) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };

        let ec_bytes_per_block = version.ecc_per_block(ec_level);
        let (_, count1, _, count2) = version.data_codewords_per_block(ec_level);
        let ec_bytes = (count1 + count2) * ec_bytes_per_block;

        (ec_bytes - p) / 2
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().expect("Blocks is empty");
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
