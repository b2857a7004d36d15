// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_encoding::bytes_from_hex;

// 1024-bit RSA key pair, e = 65537
pub const RSA_PUBLIC_KEY_SPKI_HEX: &str = concat!(
    "30819f300d06092a864886f70d010101050003818d0030818902818100a56e4a",
    "0e701017589a5187dc7ea841d156f2ec0e36ad52a44dfeb1e61f7ad991d8c510",
    "56ffedb162b4c0f283a12a88a394dff526ab7291cbb307ceabfce0b1dfd5cd95",
    "08096d5b2b8b6df5d671ef6377c0921cb23c270a70e2598e6ff89d19f105acc2",
    "d3f0cb35f29280e1386b6f64c4ef22e1e1f20d0ce8cffb2249bd9a2137020301",
    "0001",
);

pub const RSA_PRIVATE_KEY_PKCS8_HEX: &str = concat!(
    "30820275020100300d06092a864886f70d01010105000482025f3082025b0201",
    "0002818100a56e4a0e701017589a5187dc7ea841d156f2ec0e36ad52a44dfeb1",
    "e61f7ad991d8c51056ffedb162b4c0f283a12a88a394dff526ab7291cbb307ce",
    "abfce0b1dfd5cd9508096d5b2b8b6df5d671ef6377c0921cb23c270a70e2598e",
    "6ff89d19f105acc2d3f0cb35f29280e1386b6f64c4ef22e1e1f20d0ce8cffb22",
    "49bd9a2137020301000102818033a5042a90b27d4f5451ca9bbbd0b44771a101",
    "af884340aef9885f2a4bbe92e894a724ac3c568c8f97853ad07c0266c8c6a3ca",
    "0929f1e8f11231884429fc4d9ae55fee896a10ce707c3ed7e734e44727a39574",
    "501a532683109c2abacaba283c31b4bd2f53c3ee37e352cee34f9e503bd80c06",
    "22ad79c6dcee883547c6a3b325024100e7e8942720a877517273a356053ea2a1",
    "bc0c94aa72d55c6e86296b2dfc967948c0a72cbccca7eacb35706e09a1df55a1",
    "535bd9b3cc34160b3b6dcd3eda8e6443024100b69dca1cf7d4d7ec81e75b90fc",
    "ca874abcde123fd2700180aa90479b6e48de8d67ed24f9f19d85ba275874f542",
    "cd20dc723e6963364a1f9425452b269a6799fd024028fa13938655be1f8a159c",
    "baca5a72ea190c30089e19cd274a556f36c4f6e19f554b34c077790427bbdd8d",
    "d3ede2448328f385d81b30e8e43b2fffa02786197902401a8b38f398fa712049",
    "898d7fb79ee0a77668791299cdfa09efc0e507acb21ed74301ef5bfd48be455e",
    "aeb6e1678255827580a8e4e8e14151d1510a82a3f2e729024027156aba4126d2",
    "4a81f3a528cbfb27f56886f840a9f6e86e17a44b94fe9319584b8e22fdde1e5a",
    "2e3bd8aa5ba8d8584194eb2190acf832b847f13a3d24a79f4d",
);

pub fn hex(s: &str) -> Vec<u8> {
    bytes_from_hex(s.as_bytes()).unwrap()
}

/// The modulus of the fixture key pair, without the DER sign byte.
pub fn rsa_fixture_modulus() -> Vec<u8> {
    // SEQUENCE, AlgorithmIdentifier, BIT STRING, SEQUENCE, INTEGER header with its 0x00
    let spki = hex(RSA_PUBLIC_KEY_SPKI_HEX);
    spki[29..29 + 128].to_vec()
}
