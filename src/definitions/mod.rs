/*!
 * Translation definitions.
 *
 * - `ini`: reader for the key/value section files
 * - `store`: the merged translation table with category and global lookup
 */

pub use self::ini::{ParsedSection, SectionFile};
pub use self::store::{
    DefinitionStore, Section, SourceName, TranslationScope, GLOBAL_SECTION, GLOBAL_SOURCE,
    LOCAL_SOURCE, PATTERN_SUFFIX, SCOPE_KEY,
};

pub mod ini;
pub mod store;
