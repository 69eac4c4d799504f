//
// (C) Copyright IBM 2026
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

use ml_engine_api::{Client, ClientBuilder};

pub const TOKEN: &str = "test-token";

pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Client pointed at `base_url` with transport retries disabled.
pub fn client(base_url: &str) -> Client {
    ClientBuilder::new(TOKEN.to_string())
        .with_base_url(base_url)
        .without_retries()
        .build()
        .unwrap()
}
