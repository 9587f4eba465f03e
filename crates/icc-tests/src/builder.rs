//! Synthetic profile construction
//!
//! [`ProfileBuilder`] assembles a structurally valid profile: 128-byte
//! header, contiguous tag directory, then tag payloads in insertion order.
//! The [`payload`] module encodes individual tag payloads (type signature
//! + reserved bytes + body) for every type the decoder models.

/// Header length, and the offset of the tag count
pub const HEADER_SIZE: usize = 128;

/// The 'acsp' profile magic
pub const PROFILE_MAGIC: u32 = 0x61637370;

/// Builds profile byte buffers field by field
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    cmm_type: u32,
    version: (u8, u8, u8),
    device_class: [u8; 4],
    color_space: [u8; 4],
    pcs: [u8; 4],
    creation_date: [u16; 6],
    magic: u32,
    platform: u32,
    manufacturer: u32,
    model: u32,
    attributes: u64,
    rendering_intent: u32,
    illuminant: [u32; 3],
    creator: u32,
    checksum: u32,
    tags: Vec<([u8; 4], Vec<u8>)>,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    /// A v4 RGB display profile with an XYZ connection space
    pub fn new() -> Self {
        Self {
            cmm_type: 0,
            version: (4, 3, 0),
            device_class: *b"mntr",
            color_space: *b"RGB ",
            pcs: *b"XYZ ",
            creation_date: [2020, 1, 1, 0, 0, 0],
            magic: PROFILE_MAGIC,
            platform: 0,
            manufacturer: 0,
            model: 0,
            attributes: 0,
            rendering_intent: 0,
            // D50, as the header field is specified to carry
            illuminant: [0x0000F6D6, 0x00010000, 0x0000D32D],
            creator: 0,
            checksum: 0,
            tags: Vec::new(),
        }
    }

    pub fn cmm_type(mut self, v: u32) -> Self {
        self.cmm_type = v;
        self
    }

    pub fn version(mut self, major: u8, minor: u8, bugfix: u8) -> Self {
        self.version = (major, minor, bugfix);
        self
    }

    pub fn device_class(mut self, sig: [u8; 4]) -> Self {
        self.device_class = sig;
        self
    }

    pub fn color_space(mut self, sig: [u8; 4]) -> Self {
        self.color_space = sig;
        self
    }

    pub fn pcs(mut self, sig: [u8; 4]) -> Self {
        self.pcs = sig;
        self
    }

    pub fn creation_date(mut self, ymd_hms: [u16; 6]) -> Self {
        self.creation_date = ymd_hms;
        self
    }

    pub fn magic(mut self, v: u32) -> Self {
        self.magic = v;
        self
    }

    pub fn platform(mut self, v: u32) -> Self {
        self.platform = v;
        self
    }

    pub fn manufacturer(mut self, v: u32) -> Self {
        self.manufacturer = v;
        self
    }

    pub fn model(mut self, v: u32) -> Self {
        self.model = v;
        self
    }

    pub fn attributes(mut self, v: u64) -> Self {
        self.attributes = v;
        self
    }

    pub fn rendering_intent(mut self, v: u32) -> Self {
        self.rendering_intent = v;
        self
    }

    pub fn illuminant(mut self, raw_xyz: [u32; 3]) -> Self {
        self.illuminant = raw_xyz;
        self
    }

    pub fn creator(mut self, v: u32) -> Self {
        self.creator = v;
        self
    }

    pub fn checksum(mut self, v: u32) -> Self {
        self.checksum = v;
        self
    }

    /// Append a tag; `data` is the full payload including type header
    pub fn tag(mut self, sig: [u8; 4], data: Vec<u8>) -> Self {
        self.tags.push((sig, data));
        self
    }

    /// Serialize to profile bytes
    pub fn build(&self) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[4..8].copy_from_slice(&self.cmm_type.to_be_bytes());
        data[8] = self.version.0;
        data[9] = (self.version.1 << 4) | (self.version.2 & 0x0F);
        data[12..16].copy_from_slice(&self.device_class);
        data[16..20].copy_from_slice(&self.color_space);
        data[20..24].copy_from_slice(&self.pcs);
        for (i, field) in self.creation_date.iter().enumerate() {
            data[24 + i * 2..26 + i * 2].copy_from_slice(&field.to_be_bytes());
        }
        data[36..40].copy_from_slice(&self.magic.to_be_bytes());
        data[40..44].copy_from_slice(&self.platform.to_be_bytes());
        data[48..52].copy_from_slice(&self.manufacturer.to_be_bytes());
        data[52..56].copy_from_slice(&self.model.to_be_bytes());
        data[56..64].copy_from_slice(&self.attributes.to_be_bytes());
        data[64..68].copy_from_slice(&self.rendering_intent.to_be_bytes());
        for (i, component) in self.illuminant.iter().enumerate() {
            data[68 + i * 4..72 + i * 4].copy_from_slice(&component.to_be_bytes());
        }
        data[80..84].copy_from_slice(&self.creator.to_be_bytes());
        data[84..88].copy_from_slice(&self.checksum.to_be_bytes());

        data.extend_from_slice(&(self.tags.len() as u32).to_be_bytes());
        let mut offset = HEADER_SIZE + 4 + self.tags.len() * 12;
        for (sig, payload) in &self.tags {
            data.extend_from_slice(sig);
            data.extend_from_slice(&(offset as u32).to_be_bytes());
            data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            offset += payload.len();
        }
        for (_, payload) in &self.tags {
            data.extend_from_slice(payload);
        }

        let size = data.len() as u32;
        data[0..4].copy_from_slice(&size.to_be_bytes());
        data
    }
}

/// Tag payload encoders: type signature, 4 reserved bytes, then the body
pub mod payload {
    /// Wrap a body in the uniform type header
    pub fn typed(type_sig: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + body.len());
        out.extend_from_slice(type_sig);
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(body);
        out
    }

    /// XYZType with one or more raw s15Fixed16 triples
    pub fn xyz(triples: &[[u32; 3]]) -> Vec<u8> {
        let mut body = Vec::new();
        for t in triples {
            for component in t {
                body.extend_from_slice(&component.to_be_bytes());
            }
        }
        typed(b"XYZ ", &body)
    }

    /// The D50 white point as an XYZType payload
    pub fn xyz_d50() -> Vec<u8> {
        xyz(&[[0x0000F6D6, 0x00010000, 0x0000D32D]])
    }

    /// curveType with a sample table (u16 values)
    pub fn curve_table(samples: &[u16]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(samples.len() as u32).to_be_bytes());
        for s in samples {
            body.extend_from_slice(&s.to_be_bytes());
        }
        typed(b"curv", &body)
    }

    /// curveType holding a single u8Fixed8 gamma
    pub fn curve_gamma(raw_u8f8: u16) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&1u32.to_be_bytes());
        body.extend_from_slice(&raw_u8f8.to_be_bytes());
        typed(b"curv", &body)
    }

    /// parametricCurveType with raw s15Fixed16 parameters
    pub fn parametric_curve(function_type: u16, params: &[u32]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&function_type.to_be_bytes());
        body.extend_from_slice(&[0u8; 2]);
        for p in params {
            body.extend_from_slice(&p.to_be_bytes());
        }
        typed(b"para", &body)
    }

    /// textType, null-terminated
    pub fn text(s: &str) -> Vec<u8> {
        let mut body = s.as_bytes().to_vec();
        body.push(0);
        typed(b"text", &body)
    }

    /// textDescriptionType with the full legacy trailer
    pub fn description(s: &str) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&((s.len() + 1) as u32).to_be_bytes());
        body.extend_from_slice(s.as_bytes());
        body.push(0);
        body.extend_from_slice(&[0u8; 8]); // Unicode code + count
        body.extend_from_slice(&[0u8; 70]); // ScriptCode trailer
        typed(b"desc", &body)
    }

    /// multiLocalizedUnicodeType with (language, country, text) records
    pub fn mluc(records: &[(&str, &str, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(records.len() as u32).to_be_bytes());
        body.extend_from_slice(&12u32.to_be_bytes());

        let strings_base = 8 + 8 + records.len() * 12; // tag-relative
        let mut string_offset = strings_base;
        let mut strings = Vec::new();
        for (lang, country, text) in records {
            let encoded: Vec<u8> = text
                .encode_utf16()
                .flat_map(|u| u.to_be_bytes())
                .collect();
            body.extend_from_slice(lang.as_bytes());
            body.extend_from_slice(country.as_bytes());
            body.extend_from_slice(&(encoded.len() as u32).to_be_bytes());
            body.extend_from_slice(&(string_offset as u32).to_be_bytes());
            string_offset += encoded.len();
            strings.push(encoded);
        }
        for s in strings {
            body.extend_from_slice(&s);
        }
        typed(b"mluc", &body)
    }

    /// s15Fixed16ArrayType from raw fixed-point values
    pub fn s15_array(raw: &[u32]) -> Vec<u8> {
        let mut body = Vec::new();
        for v in raw {
            body.extend_from_slice(&v.to_be_bytes());
        }
        typed(b"sf32", &body)
    }

    /// A 3x3 chromatic-adaptation matrix as an sf32 payload, row-major
    pub fn chad_matrix(rows: &[u32; 9]) -> Vec<u8> {
        s15_array(rows)
    }

    /// signatureType
    pub fn signature(sig: &[u8; 4]) -> Vec<u8> {
        typed(b"sig ", sig)
    }

    /// dateTimeType
    pub fn date_time(ymd_hms: [u16; 6]) -> Vec<u8> {
        let mut body = Vec::new();
        for field in ymd_hms {
            body.extend_from_slice(&field.to_be_bytes());
        }
        typed(b"dtim", &body)
    }

    /// dataType with the given flag and bytes
    pub fn data(flag: u32, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&flag.to_be_bytes());
        body.extend_from_slice(bytes);
        typed(b"data", &body)
    }

    /// measurementType
    pub fn measurement(
        observer: u32,
        backing: [u32; 3],
        geometry: u32,
        flare_u16f16: u32,
        illuminant: u32,
    ) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&observer.to_be_bytes());
        for component in backing {
            body.extend_from_slice(&component.to_be_bytes());
        }
        body.extend_from_slice(&geometry.to_be_bytes());
        body.extend_from_slice(&flare_u16f16.to_be_bytes());
        body.extend_from_slice(&illuminant.to_be_bytes());
        typed(b"meas", &body)
    }

    /// viewingConditionsType
    pub fn viewing_conditions(
        illuminant: [u32; 3],
        surround: [u32; 3],
        illuminant_type: u32,
    ) -> Vec<u8> {
        let mut body = Vec::new();
        for component in illuminant.iter().chain(surround.iter()) {
            body.extend_from_slice(&component.to_be_bytes());
        }
        body.extend_from_slice(&illuminant_type.to_be_bytes());
        typed(b"view", &body)
    }

    /// chromaticityType
    pub fn chromaticity(colorant_system: u16, coords: &[(u32, u32)]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(coords.len() as u16).to_be_bytes());
        body.extend_from_slice(&colorant_system.to_be_bytes());
        for (x, y) in coords {
            body.extend_from_slice(&x.to_be_bytes());
            body.extend_from_slice(&y.to_be_bytes());
        }
        typed(b"chrm", &body)
    }

    /// colorantOrderType
    pub fn colorant_order(order: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(order.len() as u32).to_be_bytes());
        body.extend_from_slice(order);
        typed(b"clro", &body)
    }

    /// colorantTableType from (name, pcs) entries
    pub fn colorant_table(entries: &[(&str, [u16; 3])]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for (name, pcs) in entries {
            body.extend_from_slice(&name_field(name));
            for v in pcs {
                body.extend_from_slice(&v.to_be_bytes());
            }
        }
        typed(b"clrt", &body)
    }

    /// namedColor2Type
    pub fn named_colors(
        prefix: &str,
        suffix: &str,
        device_coords: usize,
        colors: &[(&str, [u16; 3], Vec<u16>)],
    ) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&0u32.to_be_bytes()); // vendor flags
        body.extend_from_slice(&(colors.len() as u32).to_be_bytes());
        body.extend_from_slice(&(device_coords as u32).to_be_bytes());
        body.extend_from_slice(&name_field(prefix));
        body.extend_from_slice(&name_field(suffix));
        for (name, pcs, device) in colors {
            body.extend_from_slice(&name_field(name));
            for v in pcs {
                body.extend_from_slice(&v.to_be_bytes());
            }
            for v in device {
                body.extend_from_slice(&v.to_be_bytes());
            }
        }
        typed(b"ncl2", &body)
    }

    /// profileSequenceDescType; each record embeds two desc sub-records
    pub fn profile_sequence(records: &[(&[u8; 4], &[u8; 4], &str, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(records.len() as u32).to_be_bytes());
        for (manufacturer, model, mfg_text, model_text) in records {
            body.extend_from_slice(*manufacturer);
            body.extend_from_slice(*model);
            body.extend_from_slice(&0u64.to_be_bytes());
            body.extend_from_slice(b"CRT ");
            body.extend_from_slice(&description(mfg_text));
            body.extend_from_slice(&description(model_text));
        }
        typed(b"pseq", &body)
    }

    /// responseCurveSet16Type with one measurement unit
    pub fn response_curves(unit: &[u8; 4], channels: &[Vec<(u16, u32)>]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(channels.len() as u16).to_be_bytes());
        body.extend_from_slice(&1u16.to_be_bytes());
        // The lone structure starts right after the offset table
        let structure_offset = 8 + 4 + 4;
        body.extend_from_slice(&(structure_offset as u32).to_be_bytes());

        body.extend_from_slice(unit);
        for samples in channels {
            body.extend_from_slice(&(samples.len() as u32).to_be_bytes());
        }
        for _ in channels {
            for component in [0x00010000u32; 3] {
                body.extend_from_slice(&component.to_be_bytes());
            }
        }
        for samples in channels {
            for (device, measurement) in samples {
                body.extend_from_slice(&device.to_be_bytes());
                body.extend_from_slice(&[0u8; 2]);
                body.extend_from_slice(&measurement.to_be_bytes());
            }
        }
        typed(b"rcs2", &body)
    }

    /// lut8Type with identity matrix and flat tables
    pub fn lut8(inputs: u8, outputs: u8, grid: u8) -> Vec<u8> {
        let mut body = vec![inputs, outputs, grid, 0];
        for r in 0..3 {
            for c in 0..3 {
                let v: u32 = if r == c { 0x00010000 } else { 0 };
                body.extend_from_slice(&v.to_be_bytes());
            }
        }
        for _ in 0..inputs {
            body.extend((0..=255u8).collect::<Vec<_>>());
        }
        let clut = (grid as usize).pow(inputs as u32) * outputs as usize;
        body.extend(vec![128u8; clut]);
        for _ in 0..outputs {
            body.extend((0..=255u8).collect::<Vec<_>>());
        }
        typed(b"mft1", &body)
    }

    /// lutAToBType carrying only B curves (identity curv elements)
    pub fn lut_a2b_identity(inputs: u8, outputs: u8) -> Vec<u8> {
        let mut body = vec![inputs, outputs, 0, 0];
        body.extend_from_slice(&32u32.to_be_bytes()); // B offset from tag start
        body.extend_from_slice(&[0u8; 16]); // other stages absent
        for _ in 0..outputs {
            body.extend_from_slice(b"curv");
            body.extend_from_slice(&[0u8; 4]);
            body.extend_from_slice(&0u32.to_be_bytes());
        }
        typed(b"mAB ", &body)
    }

    /// Fixed 32-byte null-padded ASCII name field
    fn name_field(name: &str) -> [u8; 32] {
        let mut field = [0u8; 32];
        let n = name.len().min(31);
        field[..n].copy_from_slice(&name.as_bytes()[..n]);
        field
    }
}
