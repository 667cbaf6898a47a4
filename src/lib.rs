pub mod thrift;
