// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// The three characters which carry meaning in a Whitespace program.
pub const SPACE: char = ' ';
pub const TAB: char = '\t';
pub const LINEFEED: char = '\n';

/// Strip every character which is not space, tab or line feed from
/// the raw source, preserving the order of the survivors.  The
/// language permits free-form comments anywhere, even in the middle
/// of a number or label body, so this runs before any tokenization.
pub fn filter(source: &str) -> String {
    source
        .chars()
        .filter(|&c| c == SPACE || c == TAB || c == LINEFEED)
        .collect()
}

/// Render a piece of source in readable letter form: space becomes
/// `S`, tab becomes `T`, line feed becomes `L` and anything else
/// becomes `*`.  At most `limit` characters are rendered.  Used for
/// diagnostics and trace output only.
pub fn unwhite(source: &str, limit: usize) -> String {
    source.chars().take(limit).map(letter).collect()
}

/// The letter form of a single character.
pub fn letter(c: char) -> char {
    match c {
        SPACE => 'S',
        TAB => 'T',
        LINEFEED => 'L',
        _ => '*',
    }
}
