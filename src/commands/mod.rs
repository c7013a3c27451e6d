// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod balances;
pub mod importer;
pub mod summary;
pub mod history;
pub mod exporter;
pub mod fx;
pub mod settings;
